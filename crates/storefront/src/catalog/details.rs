//! Enriched product detail bundles.
//!
//! Specs, shipping tiers, warranty text, and the illustrative reviews are
//! derived placeholder content for product pages. The reviews here are demo
//! copy, not the customer review store.

use webshop_core::{Product, format_price_plain};

use super::Catalog;

/// One shipping tier offered on the product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingTier {
    /// Cost in minor units.
    pub cost: i64,
    pub time: &'static str,
    pub tracking: bool,
}

/// Flat shipping rates plus the free-shipping threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingOptions {
    pub standard: ShippingTier,
    pub express: ShippingTier,
    /// Order value, minor units, at which shipping becomes free.
    pub free_threshold: i64,
    pub free_eligible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarrantyInfo {
    pub duration: &'static str,
    pub coverage: &'static str,
    pub support: &'static str,
}

/// Fixed demo review shown on every product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleReview {
    pub id: &'static str,
    pub author: &'static str,
    pub rating: u8,
    pub title: &'static str,
    pub comment: &'static str,
    pub date: &'static str,
    pub verified: bool,
}

/// Everything a product page needs in one bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub product: Product,
    pub related: Vec<Product>,
    /// Ordered key/value pairs; contents depend on the product's tags.
    pub specs: Vec<(&'static str, String)>,
    pub shipping: ShippingOptions,
    pub warranty: WarrantyInfo,
    pub reviews: Vec<SampleReview>,
}

const FREE_SHIPPING_THRESHOLD: i64 = 5000;

impl Catalog {
    /// Bundle a product with four related products, derived specs, shipping
    /// tiers, warranty text, and illustrative reviews.
    #[must_use]
    pub fn product_details(&self, product: &Product) -> ProductDetails {
        ProductDetails {
            product: product.clone(),
            related: self.related_products(product, 4),
            specs: product_specs(product),
            shipping: shipping_options(product),
            warranty: warranty_info(product),
            reviews: sample_reviews(),
        }
    }
}

fn product_specs(product: &Product) -> Vec<(&'static str, String)> {
    let mut specs = vec![
        ("Reference", product.id.to_string()),
        ("Category", Catalog::primary_category(product).to_string()),
        ("Price", format_price_plain(product.price, product.currency)),
    ];
    if let Some(stock) = product.stock {
        let unit = if stock == 1 { "unit" } else { "units" };
        specs.push(("Stock", format!("{stock} {unit}")));
    }

    if product.has_tag("electronics") {
        specs.push(("Warranty", "2 years".to_string()));
        specs.push(("Power", "USB-C powered".to_string()));
        specs.push(("Compatibility", "Universal".to_string()));
    }
    if product.has_tag("clothing") {
        specs.push(("Material", "100% Cotton".to_string()));
        specs.push(("Care", "Machine washable".to_string()));
        specs.push(("Origin", "Made in Portugal".to_string()));
    }
    if product.has_tag("book") {
        specs.push(("Format", "Paperback".to_string()));
        specs.push(("Pages", "200-400 pages".to_string()));
        specs.push(("Language", "English".to_string()));
    }
    if product.has_tag("gaming") {
        specs.push(("Compatibility", "PC, Mac, Linux".to_string()));
        specs.push(("Lighting", "RGB customizable".to_string()));
        specs.push(("Connectivity", "Wireless/USB".to_string()));
    }
    specs
}

fn shipping_options(product: &Product) -> ShippingOptions {
    ShippingOptions {
        standard: ShippingTier {
            cost: 499,
            time: "3-5 business days",
            tracking: true,
        },
        express: ShippingTier {
            cost: 999,
            time: "1-2 business days",
            tracking: true,
        },
        free_threshold: FREE_SHIPPING_THRESHOLD,
        free_eligible: product.price >= FREE_SHIPPING_THRESHOLD,
    }
}

fn warranty_info(product: &Product) -> WarrantyInfo {
    if product.has_tag("electronics") {
        WarrantyInfo {
            duration: "2 years",
            coverage: "Manufacturing defects",
            support: "Email and phone support",
        }
    } else {
        WarrantyInfo {
            duration: "1 year",
            coverage: "Manufacturing defects",
            support: "Email support",
        }
    }
}

fn sample_reviews() -> Vec<SampleReview> {
    vec![
        SampleReview {
            id: "r1",
            author: "John D.",
            rating: 5,
            title: "Excellent quality!",
            comment: "Very satisfied with this purchase. The quality exceeded my expectations.",
            date: "2024-01-15",
            verified: true,
        },
        SampleReview {
            id: "r2",
            author: "Sarah M.",
            rating: 4,
            title: "Good product",
            comment: "Nice design and good quality. Delivery was fast.",
            date: "2024-01-12",
            verified: true,
        },
        SampleReview {
            id: "r3",
            author: "Mike R.",
            rating: 5,
            title: "Highly recommended",
            comment: "Perfect for my needs. Will definitely buy again.",
            date: "2024-01-10",
            verified: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_electronics_get_extended_warranty_and_specs() {
        let catalog = Catalog::builtin();
        let keyboard = catalog.by_slug("mechanical-keyboard").expect("known slug");
        let details = catalog.product_details(keyboard);

        assert_eq!(details.warranty.duration, "2 years");
        assert!(details.specs.iter().any(|(k, v)| *k == "Power" && v == "USB-C powered"));
        assert!(details.related.len() <= 4);
        assert_eq!(details.reviews.len(), 3);
    }

    #[test]
    fn test_non_electronics_get_standard_warranty() {
        let catalog = Catalog::builtin();
        let shirt = catalog.by_slug("tshirt-svelte").expect("known slug");
        let details = catalog.product_details(shirt);

        assert_eq!(details.warranty.duration, "1 year");
        assert!(details.specs.iter().any(|(k, v)| *k == "Material" && v == "100% Cotton"));
    }

    #[test]
    fn test_free_shipping_depends_on_price_threshold() {
        let catalog = Catalog::builtin();
        let cheap = catalog.by_slug("sticker-pack").expect("known slug");
        let pricey = catalog.by_slug("premium-hoodie").expect("known slug");

        assert!(!catalog.product_details(cheap).shipping.free_eligible);
        assert!(catalog.product_details(pricey).shipping.free_eligible);
    }

    #[test]
    fn test_base_specs_always_present() {
        let catalog = Catalog::builtin();
        let bottle = catalog.by_slug("water-bottle").expect("known slug");
        let details = catalog.product_details(bottle);

        let keys: Vec<&str> = details.specs.iter().map(|(k, _)| *k).collect();
        assert_eq!(&keys[..3], &["Reference", "Category", "Price"]);
        assert!(details.specs.iter().any(|(k, v)| *k == "Price" && v == "28.00 EUR"));
    }
}
