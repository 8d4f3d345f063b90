//! Favorites (wishlist) store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use webshop_core::{Product, ProductId};

use super::{Store, Subscription, derive, load_or, persist_on_change};
use crate::kv::{SharedKv, keys};

/// A favorited product, denormalized so the list survives catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub price: i64,
    pub image: String,
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            added_at: Utc::now(),
        }
    }
}

/// Persisted list of favorited products with a derived count store.
pub struct FavoritesStore {
    entries: Store<Vec<FavoriteEntry>>,
    count: Store<usize>,
    _subscriptions: Vec<Subscription<Vec<FavoriteEntry>>>,
}

impl FavoritesStore {
    #[must_use]
    pub fn new(kv: SharedKv) -> Self {
        let entries = Store::new(load_or(&kv, keys::FAVORITES, Vec::new));
        let persist = persist_on_change(&entries, kv, keys::FAVORITES);
        let (count, count_sub) = derive(&entries, Vec::len);
        Self {
            entries,
            count,
            _subscriptions: vec![persist, count_sub],
        }
    }

    #[must_use]
    pub fn list(&self) -> Vec<FavoriteEntry> {
        self.entries.snapshot()
    }

    #[must_use]
    pub fn observe(&self) -> Store<Vec<FavoriteEntry>> {
        self.entries.clone()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count.snapshot()
    }

    /// Add a product. Idempotent: an already-favorited product is unchanged.
    pub fn add(&self, product: &Product) {
        self.entries.update(|entries| {
            if !entries.iter().any(|entry| entry.id == product.id) {
                entries.push(FavoriteEntry::from_product(product));
            }
        });
    }

    /// Remove a product. No-op when absent.
    pub fn remove(&self, product_id: &ProductId) {
        self.entries
            .update(|entries| entries.retain(|entry| &entry.id != product_id));
    }

    /// Flip membership; returns whether the product is now favorited.
    pub fn toggle(&self, product: &Product) -> bool {
        self.entries.update(|entries| {
            if entries.iter().any(|entry| entry.id == product.id) {
                entries.retain(|entry| entry.id != product.id);
                false
            } else {
                entries.push(FavoriteEntry::from_product(product));
                true
            }
        })
    }

    #[must_use]
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.entries
            .read(|entries| entries.iter().any(|entry| &entry.id == product_id))
    }

    pub fn clear(&self) {
        self.entries.set(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use webshop_core::Currency;

    use super::*;
    use crate::kv::MemoryKv;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            slug: format!("product-{id}"),
            name: format!("Product {id}"),
            description: String::new(),
            price: 1000,
            currency: Currency::Eur,
            image: "/img/p.png".to_string(),
            tags: vec![],
            stock: Some(5),
            active: true,
        }
    }

    fn store() -> FavoritesStore {
        FavoritesStore::new(Arc::new(MemoryKv::new()))
    }

    #[test]
    fn test_add_is_idempotent() {
        let favorites = store();
        favorites.add(&product("p1"));
        favorites.add(&product("p1"));
        assert_eq!(favorites.count(), 1);
    }

    #[test]
    fn test_toggle_flips_membership() {
        let favorites = store();
        assert!(favorites.toggle(&product("p1")));
        assert!(favorites.is_favorite(&ProductId::new("p1")));
        assert!(!favorites.toggle(&product("p1")));
        assert!(!favorites.is_favorite(&ProductId::new("p1")));
    }

    #[test]
    fn test_count_tracks_mutations() {
        let favorites = store();
        favorites.add(&product("p1"));
        favorites.add(&product("p2"));
        assert_eq!(favorites.count(), 2);
        favorites.remove(&ProductId::new("p1"));
        assert_eq!(favorites.count(), 1);
        favorites.clear();
        assert_eq!(favorites.count(), 0);
    }

    #[test]
    fn test_favorites_persist_across_reloads() {
        let kv: SharedKv = Arc::new(MemoryKv::new());
        {
            let favorites = FavoritesStore::new(Arc::clone(&kv));
            favorites.add(&product("p1"));
        }
        let reloaded = FavoritesStore::new(kv);
        assert!(reloaded.is_favorite(&ProductId::new("p1")));
    }
}
