//! Product catalog: a static product list with deterministic read-only
//! queries, plus random related-product sampling.
//!
//! Lookups are linear scans; the catalog is small and defined at load time.

mod data;
mod details;

use std::collections::HashMap;

use rand::seq::SliceRandom;
use webshop_core::{Product, ProductId, SlugError, validate_slug};

pub use details::{ProductDetails, SampleReview, ShippingOptions, ShippingTier, WarrantyInfo};

/// Product categories, defined as tag-membership predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Clothing,
    Accessories,
    Electronics,
    Books,
    New,
    Seasonal,
    Promo,
    Eco,
    Gaming,
    Exclusive,
    Collectibles,
}

impl Category {
    pub const ALL: [Self; 11] = [
        Self::Clothing,
        Self::Accessories,
        Self::Electronics,
        Self::Books,
        Self::New,
        Self::Seasonal,
        Self::Promo,
        Self::Eco,
        Self::Gaming,
        Self::Exclusive,
        Self::Collectibles,
    ];

    /// Whether a product belongs to this category.
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::Clothing => product.has_tag("clothing"),
            Self::Accessories => product.has_tag("accessories"),
            Self::Electronics => product.has_tag("electronics"),
            Self::Books => product.has_tag("book"),
            Self::New => product.has_tag("new"),
            Self::Seasonal => product.has_tag("seasonal"),
            Self::Promo => product.has_tag("promo"),
            Self::Eco => product.has_tag("eco") || product.has_tag("sustainable"),
            Self::Gaming => product.has_tag("gaming"),
            Self::Exclusive => {
                product.has_tag("limited")
                    || product.has_tag("exclusive")
                    || product.has_tag("premium")
            }
            Self::Collectibles => product.has_tag("collectible"),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clothing => "Clothing",
            Self::Accessories => "Accessories",
            Self::Electronics => "Electronics",
            Self::Books => "Books",
            Self::New => "New Arrivals",
            Self::Seasonal => "Seasonal",
            Self::Promo => "Promotions",
            Self::Eco => "Eco-Friendly",
            Self::Gaming => "Gaming",
            Self::Exclusive => "Exclusive",
            Self::Collectibles => "Collectibles",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Name,
    Stock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Narrowing and ordering options for [`Catalog::search_advanced`].
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Keep products matching any of these categories. Empty means no filter.
    pub categories: Vec<Category>,
    /// Inclusive price range in minor units.
    pub price_range: Option<(i64, i64)>,
    /// Keep only products with stock > 0.
    pub in_stock: bool,
    pub sort: Option<(SortField, SortDirection)>,
}

/// Counts per price bracket, in minor units: <5000, 5000 to under 10000,
/// 10000 to 50000, above 50000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceBrackets {
    pub under_50: usize,
    pub from_50_to_100: usize,
    pub from_100_to_500: usize,
    pub above_500: usize,
}

/// Aggregate catalog statistics over active products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_products: usize,
    /// Σ price × stock, minor units.
    pub total_value: i64,
    /// Mean active product price, minor units.
    pub average_price: i64,
    pub categories: HashMap<Category, usize>,
    pub price_brackets: PriceBrackets,
}

/// Result of a full catalog slug scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// The static product list and its query surface.
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Catalog over the built-in seed products.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(data::builtin_products())
    }

    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All active products, insertion order preserved.
    #[must_use]
    pub fn list(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.active).collect()
    }

    /// Lookup by slug, inactive products included.
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Lookup by identifier, inactive products included.
    #[must_use]
    pub fn by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Case-insensitive substring match against name, description, or any
    /// tag. Active products only.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let q = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.active
                    && (p.name.to_lowercase().contains(&q)
                        || p.description.to_lowercase().contains(&q)
                        || p.tags.iter().any(|tag| tag.to_lowercase().contains(&q)))
            })
            .collect()
    }

    /// [`search`](Self::search) narrowed by filters, then optionally sorted.
    #[must_use]
    pub fn search_advanced(&self, query: &str, filters: &SearchFilters) -> Vec<Product> {
        let mut results: Vec<Product> = self.search(query).into_iter().cloned().collect();

        if !filters.categories.is_empty() {
            results.retain(|p| filters.categories.iter().any(|c| c.matches(p)));
        }
        if let Some((min, max)) = filters.price_range {
            results.retain(|p| p.price >= min && p.price <= max);
        }
        if filters.in_stock {
            results.retain(|p| p.stock_or_zero() > 0);
        }
        if let Some((field, direction)) = filters.sort {
            let ascending = direction == SortDirection::Ascending;
            results = match field {
                SortField::Price => sort_by_price(&results, ascending),
                SortField::Name => sort_by_name(&results, ascending),
                SortField::Stock => sort_by_stock(&results, ascending),
            };
        }
        results
    }

    /// Active products in a category.
    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.active && category.matches(p))
            .collect()
    }

    /// Active products with price in `[min, max]` inclusive, minor units.
    #[must_use]
    pub fn in_price_range(&self, min: i64, max: i64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.active && p.price >= min && p.price <= max)
            .collect()
    }

    /// Active products strictly cheaper than `price`.
    #[must_use]
    pub fn under(&self, price: i64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.active && p.price < price)
            .collect()
    }

    /// Active products strictly more expensive than `price`.
    #[must_use]
    pub fn above(&self, price: i64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.active && p.price > price)
            .collect()
    }

    /// A random subset of active products sharing at least one tag with
    /// `product`, excluding the product itself. Non-deterministic order.
    #[must_use]
    pub fn related_products(&self, product: &Product, limit: usize) -> Vec<Product> {
        let mut related: Vec<Product> = self
            .products
            .iter()
            .filter(|p| {
                p.active && p.id != product.id && p.tags.iter().any(|tag| product.has_tag(tag))
            })
            .cloned()
            .collect();
        related.shuffle(&mut rand::rng());
        related.truncate(limit);
        related
    }

    /// Active products with stock above 10, highest stock first.
    #[must_use]
    pub fn popular_products(&self, limit: usize) -> Vec<Product> {
        let mut popular: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.active && p.stock_or_zero() > 10)
            .cloned()
            .collect();
        popular.sort_by(|a, b| b.stock_or_zero().cmp(&a.stock_or_zero()));
        popular.truncate(limit);
        popular
    }

    /// The first `limit` active products tagged "new", in catalog order.
    #[must_use]
    pub fn new_arrivals(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.active && p.has_tag("new"))
            .take(limit)
            .collect()
    }

    /// Aggregate counts and totals over active products.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let active: Vec<&Product> = self.list();
        let total_value: i64 = active
            .iter()
            .map(|p| p.price * i64::from(p.stock_or_zero()))
            .sum();
        let price_sum: i64 = active.iter().map(|p| p.price).sum();
        let count = active.len();
        let average_price = if count == 0 {
            0
        } else {
            price_sum / i64::try_from(count).unwrap_or(1)
        };

        let mut brackets = PriceBrackets::default();
        for p in &active {
            match p.price {
                i64::MIN..5000 => brackets.under_50 += 1,
                5000..10000 => brackets.from_50_to_100 += 1,
                10000..=50000 => brackets.from_100_to_500 += 1,
                _ => brackets.above_500 += 1,
            }
        }

        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let count = active.iter().filter(|p| category.matches(p)).count();
                (category, count)
            })
            .collect();

        CatalogStats {
            total_products: count,
            total_value,
            average_price,
            categories,
            price_brackets: brackets,
        }
    }

    /// Scan every product's slug: missing, malformed, duplicate, and
    /// slug-to-identifier mismatches are reported as itemized messages.
    #[must_use]
    pub fn validate_slugs(&self) -> SlugValidation {
        let mut errors = Vec::new();
        let mut seen: HashMap<&str, &ProductId> = HashMap::new();

        for product in &self.products {
            match validate_slug(&product.slug) {
                Err(SlugError::Empty) => {
                    errors.push(format!(
                        "Product {} ({}) has no slug",
                        product.id, product.name
                    ));
                    continue;
                }
                Err(SlugError::Malformed(slug)) => {
                    errors.push(format!(
                        "Product {} ({}) has invalid slug: {slug}",
                        product.id, product.name
                    ));
                }
                Ok(()) => {}
            }

            if let Some(first) = seen.get(product.slug.as_str()) {
                errors.push(format!(
                    "Duplicate slug {} declared by {} and {}",
                    product.slug, first, product.id
                ));
            } else {
                seen.insert(&product.slug, &product.id);
            }

            match self.by_slug(&product.slug) {
                Some(found) if found.id == product.id => {}
                _ => errors.push(format!(
                    "Slug {} doesn't resolve back to product {}",
                    product.slug, product.id
                )),
            }
        }

        SlugValidation {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The product's primary category label, first match wins.
    #[must_use]
    pub fn primary_category(product: &Product) -> &'static str {
        const ORDER: [Category; 9] = [
            Category::Clothing,
            Category::Electronics,
            Category::Books,
            Category::Gaming,
            Category::Accessories,
            Category::Eco,
            Category::New,
            Category::Exclusive,
            Category::Promo,
        ];
        ORDER
            .into_iter()
            .find(|c| c.matches(product))
            .map_or("General", Category::label)
    }
}

/// Stable price sort over a new sequence; the input is untouched.
#[must_use]
pub fn sort_by_price(products: &[Product], ascending: bool) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| {
        if ascending {
            a.price.cmp(&b.price)
        } else {
            b.price.cmp(&a.price)
        }
    });
    sorted
}

/// Stable name sort over a new sequence.
#[must_use]
pub fn sort_by_name(products: &[Product], ascending: bool) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| {
        if ascending {
            a.name.cmp(&b.name)
        } else {
            b.name.cmp(&a.name)
        }
    });
    sorted
}

/// Stable stock sort over a new sequence; missing stock counts as zero.
#[must_use]
pub fn sort_by_stock(products: &[Product], ascending: bool) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| {
        if ascending {
            a.stock_or_zero().cmp(&b.stock_or_zero())
        } else {
            b.stock_or_zero().cmp(&a.stock_or_zero())
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use webshop_core::Currency;

    use super::*;

    fn fixture(id: &str, slug: &str, name: &str, price: i64, tags: &[&str], stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            slug: slug.to_string(),
            name: name.to_string(),
            description: String::new(),
            price,
            currency: Currency::Eur,
            image: String::new(),
            tags: tags.iter().map(ToString::to_string).collect(),
            stock: Some(stock),
            active: true,
        }
    }

    #[test]
    fn test_by_slug_finds_first_declaring_product() {
        let catalog = Catalog::builtin();
        let product = catalog.by_slug("tshirt-svelte").expect("known slug");
        assert_eq!(product.id, ProductId::new("p1"));
        assert!(catalog.by_slug("no-such-slug").is_none());
    }

    #[test]
    fn test_list_excludes_inactive_and_keeps_order() {
        let mut inactive = fixture("x1", "gone", "Gone", 100, &[], 1);
        inactive.active = false;
        let catalog = Catalog::new(vec![
            fixture("a", "a", "A", 100, &[], 1),
            inactive,
            fixture("b", "b", "B", 200, &[], 1),
        ]);
        let listed: Vec<&str> = catalog.list().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(listed, vec!["a", "b"]);
    }

    #[test]
    fn test_search_matches_name_description_and_tags() {
        let catalog = Catalog::builtin();
        let by_name = catalog.search("SVELTE");
        assert!(by_name.iter().any(|p| p.slug == "tshirt-svelte"));
        assert!(by_name.iter().any(|p| p.slug == "svelte-book"));

        let by_tag = catalog.search("collectible");
        assert_eq!(by_tag.len(), 2);
    }

    #[test]
    fn test_search_advanced_filters_and_sorts() {
        let catalog = Catalog::builtin();
        let filters = SearchFilters {
            categories: vec![Category::Gaming],
            price_range: Some((3000, 13000)),
            in_stock: true,
            sort: Some((SortField::Price, SortDirection::Descending)),
        };
        let results = catalog.search_advanced("", &filters);
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| Category::Gaming.matches(p)));
        assert!(results.iter().all(|p| (3000..=13000).contains(&p.price)));
        assert!(results.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_sorts_are_stable_and_pure() {
        let products = vec![
            fixture("a", "a", "Alpha", 100, &[], 5),
            fixture("b", "b", "Beta", 100, &[], 3),
            fixture("c", "c", "Gamma", 50, &[], 3),
        ];
        let by_price = sort_by_price(&products, true);
        assert_eq!(by_price[0].id.as_str(), "c");
        // Equal prices keep their original relative order.
        assert_eq!(by_price[1].id.as_str(), "a");
        assert_eq!(by_price[2].id.as_str(), "b");
        // Input order untouched.
        assert_eq!(products[0].id.as_str(), "a");

        let by_stock = sort_by_stock(&products, true);
        assert_eq!(by_stock[0].id.as_str(), "b");
        assert_eq!(by_stock[1].id.as_str(), "c");
    }

    #[test]
    fn test_missing_stock_sorts_as_zero() {
        let mut no_stock = fixture("n", "n", "None", 100, &[], 0);
        no_stock.stock = None;
        let products = vec![fixture("s", "s", "Some", 100, &[], 2), no_stock];
        let sorted = sort_by_stock(&products, true);
        assert_eq!(sorted[0].id.as_str(), "n");
    }

    #[test]
    fn test_eco_category_matches_both_tags() {
        let catalog = Catalog::builtin();
        let eco = catalog.by_category(Category::Eco);
        assert!(eco.iter().any(|p| p.slug == "eco-tshirt"));
        assert!(eco.iter().any(|p| p.slug == "solar-power-bank"));
    }

    #[test]
    fn test_related_products_share_a_tag_and_respect_limit() {
        let catalog = Catalog::builtin();
        let product = catalog.by_slug("tshirt-svelte").expect("known slug").clone();
        let related = catalog.related_products(&product, 4);
        assert!(related.len() <= 4);
        for r in &related {
            assert_ne!(r.id, product.id);
            assert!(r.tags.iter().any(|tag| product.has_tag(tag)));
        }
    }

    #[test]
    fn test_popular_products_sorted_by_stock() {
        let catalog = Catalog::builtin();
        let popular = catalog.popular_products(8);
        assert_eq!(popular.len(), 8);
        assert!(popular.iter().all(|p| p.stock_or_zero() > 10));
        assert!(popular.windows(2).all(|w| w[0].stock_or_zero() >= w[1].stock_or_zero()));
    }

    #[test]
    fn test_new_arrivals_tagged_new() {
        let catalog = Catalog::builtin();
        let arrivals = catalog.new_arrivals(6);
        assert!(!arrivals.is_empty());
        assert!(arrivals.iter().all(|p| p.has_tag("new")));
    }

    #[test]
    fn test_stats_totals_and_brackets() {
        let catalog = Catalog::new(vec![
            fixture("a", "a", "A", 1000, &["clothing"], 2),
            fixture("b", "b", "B", 7000, &["electronics"], 1),
            fixture("c", "c", "C", 60000, &[], 1),
        ]);
        let stats = catalog.stats();
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.total_value, 1000 * 2 + 7000 + 60000);
        assert_eq!(stats.average_price, (1000 + 7000 + 60000) / 3);
        assert_eq!(stats.price_brackets.under_50, 1);
        assert_eq!(stats.price_brackets.from_50_to_100, 1);
        assert_eq!(stats.price_brackets.above_500, 1);
        assert_eq!(stats.categories.get(&Category::Clothing), Some(&1));
        assert_eq!(stats.categories.get(&Category::Gaming), Some(&0));
    }

    #[test]
    fn test_builtin_slugs_all_validate() {
        let validation = Catalog::builtin().validate_slugs();
        assert!(validation.valid, "{:?}", validation.errors);
    }

    #[test]
    fn test_validate_slugs_reports_each_defect() {
        let catalog = Catalog::new(vec![
            fixture("a", "dup", "A", 100, &[], 1),
            fixture("b", "dup", "B", 100, &[], 1),
            fixture("c", "", "C", 100, &[], 1),
            fixture("d", "Bad_Slug", "D", 100, &[], 1),
        ]);
        let validation = catalog.validate_slugs();
        assert!(!validation.valid);
        assert!(validation.errors.iter().any(|e| e.contains("Duplicate slug dup")));
        assert!(validation.errors.iter().any(|e| e.contains("has no slug")));
        assert!(validation.errors.iter().any(|e| e.contains("invalid slug: Bad_Slug")));
        // The shadowed duplicate no longer resolves to its declaring product.
        assert!(validation
            .errors
            .iter()
            .any(|e| e.contains("doesn't resolve back to product b")));
    }

    #[test]
    fn test_primary_category_first_match_wins() {
        let shirt = fixture("a", "a", "A", 100, &["tshirt", "clothing", "promo"], 1);
        assert_eq!(Catalog::primary_category(&shirt), "Clothing");
        let plain = fixture("b", "b", "B", 100, &["misc"], 1);
        assert_eq!(Catalog::primary_category(&plain), "General");
    }
}
