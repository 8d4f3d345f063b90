//! Product record and slug validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// Currencies accepted by the storefront (ISO 4217).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Chf,
    Usd,
}

impl Currency {
    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Chf => "CHF",
            Self::Usd => "USD",
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Chf => "CHF ",
            Self::Usd => "$",
        }
    }

    /// Lowercase code as expected by the payment provider API.
    #[must_use]
    pub const fn lowercase_code(self) -> &'static str {
        match self {
            Self::Eur => "eur",
            Self::Chf => "chf",
            Self::Usd => "usd",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A catalog product.
///
/// Products are immutable once loaded into the catalog. Prices are integer
/// minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// URL slug, unique across the catalog, lowercase kebab-case.
    pub slug: String,
    pub name: String,
    pub description: String,
    /// Price in minor currency units.
    pub price: i64,
    pub currency: Currency,
    /// Static asset path or URL.
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    pub active: bool,
}

impl Product {
    /// Check tag membership.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Stock count, treating missing stock as 0.
    #[must_use]
    pub fn stock_or_zero(&self) -> u32 {
        self.stock.unwrap_or(0)
    }
}

/// Slug shape: lowercase alphanumeric segments joined by single hyphens.
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("Invalid regex"));

/// Errors reported by [`validate_slug`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,
    #[error("slug is not lowercase kebab-case: {0}")]
    Malformed(String),
}

/// Validate a single product slug.
///
/// # Errors
///
/// Returns [`SlugError`] if the slug is empty or not lowercase kebab-case.
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    if slug.is_empty() {
        return Err(SlugError::Empty);
    }
    if !SLUG_RE.is_match(slug) {
        return Err(SlugError::Malformed(slug.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug_accepts_kebab_case() {
        assert!(validate_slug("tshirt-svelte").is_ok());
        assert!(validate_slug("usb-hub").is_ok());
        assert!(validate_slug("p1").is_ok());
    }

    #[test]
    fn test_validate_slug_rejects_bad_shapes() {
        assert_eq!(validate_slug(""), Err(SlugError::Empty));
        assert!(validate_slug("Tshirt").is_err());
        assert!(validate_slug("double--dash").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("has space").is_err());
    }

    #[test]
    fn test_currency_serde_codes() {
        let json = serde_json::to_string(&Currency::Eur).expect("serialize");
        assert_eq!(json, "\"EUR\"");
        let back: Currency = serde_json::from_str("\"CHF\"").expect("deserialize");
        assert_eq!(back, Currency::Chf);
    }

    #[test]
    fn test_product_stock_or_zero() {
        let mut product = Product {
            id: ProductId::new("p1"),
            slug: "tshirt-svelte".to_string(),
            name: "Svelte T-shirt Premium".to_string(),
            description: String::new(),
            price: 2500,
            currency: Currency::Eur,
            image: String::new(),
            tags: vec!["tshirt".to_string()],
            stock: Some(42),
            active: true,
        };
        assert_eq!(product.stock_or_zero(), 42);
        product.stock = None;
        assert_eq!(product.stock_or_zero(), 0);
        assert!(product.has_tag("tshirt"));
        assert!(!product.has_tag("hoodie"));
    }
}
