//! Shopping cart store.

use webshop_core::{CartLine, Product, ProductId};

use super::{Store, Subscription, derive, load_or, persist_on_change};
use crate::kv::{SharedKv, keys};

/// Ordered list of cart lines, persisted after every mutation.
///
/// Each line carries a full product snapshot taken at add time, so later
/// catalog changes do not retroactively alter the cart. Totals are a raw sum
/// of minor units with no currency conversion.
pub struct CartStore {
    lines: Store<Vec<CartLine>>,
    total: Store<i64>,
    item_count: Store<u32>,
    _subscriptions: Vec<Subscription<Vec<CartLine>>>,
}

impl CartStore {
    /// Load the persisted cart (empty on missing or corrupt data) and attach
    /// persistence plus the derived total and item-count stores.
    #[must_use]
    pub fn new(kv: SharedKv) -> Self {
        let lines = Store::new(load_or(&kv, keys::CART, Vec::new));
        let persist = persist_on_change(&lines, kv, keys::CART);
        let (total, total_sub) = derive(&lines, |lines: &Vec<CartLine>| {
            lines.iter().map(CartLine::total).sum()
        });
        let (item_count, count_sub) = derive(&lines, |lines: &Vec<CartLine>| {
            lines.iter().map(|line| line.quantity).sum()
        });
        Self {
            lines,
            total,
            item_count,
            _subscriptions: vec![persist, total_sub, count_sub],
        }
    }

    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.snapshot()
    }

    /// Observable handle over the cart lines.
    #[must_use]
    pub fn observe(&self) -> Store<Vec<CartLine>> {
        self.lines.clone()
    }

    /// Cart total in minor units. Mixed currencies are summed as-is.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.total.snapshot()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.item_count.snapshot()
    }

    /// Add a product. If a line for the same product exists, quantities merge.
    pub fn add(&self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.lines.update(|lines| {
            if let Some(line) = lines.iter_mut().find(|line| line.product.id == product.id) {
                line.quantity += quantity;
            } else {
                lines.push(CartLine { product, quantity });
            }
        });
        tracing::debug!(count = self.item_count(), "Cart updated");
    }

    /// Remove a product's line. No-op when absent.
    pub fn remove(&self, product_id: &ProductId) {
        self.lines
            .update(|lines| lines.retain(|line| &line.product.id != product_id));
    }

    /// Set a line's quantity exactly. Zero removes the line; absent is a no-op.
    pub fn update_quantity(&self, product_id: &ProductId, quantity: u32) {
        self.lines.update(|lines| {
            if quantity == 0 {
                lines.retain(|line| &line.product.id != product_id);
            } else if let Some(line) = lines.iter_mut().find(|line| &line.product.id == product_id)
            {
                line.quantity = quantity;
            }
        });
    }

    pub fn clear(&self) {
        self.lines.set(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use webshop_core::Currency;

    use super::*;
    use crate::kv::MemoryKv;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            slug: format!("product-{id}"),
            name: format!("Product {id}"),
            description: String::new(),
            price,
            currency: Currency::Eur,
            image: String::new(),
            tags: vec![],
            stock: Some(10),
            active: true,
        }
    }

    fn store() -> CartStore {
        CartStore::new(Arc::new(MemoryKv::new()))
    }

    #[test]
    fn test_adding_same_product_twice_merges_quantities() {
        let cart = store();
        cart.add(product("p1", 1000), 2);
        cart.add(product("p1", 1000), 3);

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
    }

    #[test]
    fn test_total_is_sum_of_price_times_quantity() {
        let cart = store();
        cart.add(product("p1", 1999), 2);
        cart.add(product("p2", 500), 1);
        assert_eq!(cart.total(), 1999 * 2 + 500);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let cart = store();
        cart.add(product("p1", 1000), 2);
        cart.update_quantity(&ProductId::new("p1"), 0);
        assert!(cart.lines().is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let cart = store();
        cart.add(product("p1", 1000), 2);
        cart.update_quantity(&ProductId::new("p1"), 7);
        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_remove_absent_product_is_noop() {
        let cart = store();
        cart.add(product("p1", 1000), 1);
        cart.remove(&ProductId::new("missing"));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_cart_persists_across_reloads() {
        let kv: SharedKv = Arc::new(MemoryKv::new());
        {
            let cart = CartStore::new(Arc::clone(&kv));
            cart.add(product("p1", 2500), 2);
        }
        let reloaded = CartStore::new(kv);
        assert_eq!(reloaded.item_count(), 2);
        assert_eq!(reloaded.total(), 5000);
    }

    #[test]
    fn test_malformed_persisted_cart_falls_back_to_empty() {
        let kv: SharedKv = Arc::new(MemoryKv::new());
        kv.set(keys::CART, "not json at all");
        let cart = CartStore::new(kv);
        assert!(cart.lines().is_empty());
    }
}
