//! Price formatting over integer minor currency units.
//!
//! All arithmetic in the storefront happens on integer minor units; decimal
//! conversion is confined to display formatting.

use rust_decimal::Decimal;

use crate::types::product::Currency;

/// Format minor units with the currency symbol, e.g. `€24.99`.
#[must_use]
pub fn format_price(minor: i64, currency: Currency) -> String {
    let amount = Decimal::new(minor, 2);
    format!("{}{amount:.2}", currency.symbol())
}

/// Format minor units with the trailing ISO code, e.g. `24.99 EUR`.
#[must_use]
pub fn format_price_plain(minor: i64, currency: Currency) -> String {
    let amount = Decimal::new(minor, 2);
    format!("{amount:.2} {}", currency.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_symbol() {
        assert_eq!(format_price(2500, Currency::Eur), "€25.00");
        assert_eq!(format_price(1999, Currency::Usd), "$19.99");
        assert_eq!(format_price(0, Currency::Eur), "€0.00");
    }

    #[test]
    fn test_format_price_plain() {
        assert_eq!(format_price_plain(2500, Currency::Eur), "25.00 EUR");
        assert_eq!(format_price_plain(105, Currency::Chf), "1.05 CHF");
    }

    #[test]
    fn test_format_price_single_digit_cents() {
        assert_eq!(format_price(5, Currency::Usd), "$0.05");
    }
}
