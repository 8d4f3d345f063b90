//! Cart line item.

use serde::{Deserialize, Serialize};

use crate::types::product::Product;

/// A single cart line: a product plus a positive quantity.
///
/// The cart holds at most one line per distinct product identity; the cart
/// store merges quantities on repeated adds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Line total in minor units (price × quantity).
    #[must_use]
    pub fn total(&self) -> i64 {
        self.product.price * i64::from(self.quantity)
    }
}
