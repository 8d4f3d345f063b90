//! Persistent key-value bridge.
//!
//! The storefront mirrors every store snapshot to a synchronous string
//! key-value store, one namespaced key per store. Persistence is best-effort:
//! write failures are logged and swallowed, and unreadable values are treated
//! as missing so initialization never fails on corrupt data.

mod file;
mod memory;

use std::sync::Arc;

pub use file::FileKv;
pub use memory::MemoryKv;

/// Namespaced keys for the persisted store snapshots.
pub mod keys {
    pub const CART: &str = "webshop_cart";
    pub const COUPONS: &str = "webshop_coupons";
    pub const FAVORITES: &str = "webshop_favorites";
    pub const ORDERS: &str = "webshop_orders";
    pub const REVIEWS: &str = "webshop_reviews";
    /// The currently authenticated user record.
    pub const USER: &str = "webshop_user";
    /// The list of registered accounts.
    pub const USERS: &str = "webshop_users";
    /// The session identifier for the authenticated user.
    pub const SESSION: &str = "webshop_session";
    pub const THEME: &str = "webshop_theme";
    pub const LOG_LEVEL: &str = "webshop_log_level";
}

/// A synchronous string key-value store.
///
/// Models browser local storage: string keys, JSON-serialized string values,
/// get/set/remove with no transactions. Concurrent writers to the same key
/// race with last-write-wins semantics.
pub trait KvStore: Send + Sync {
    /// Read the value for `key`, or `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write the value for `key`. Failures are logged, not surfaced.
    fn set(&self, key: &str, value: &str);

    /// Remove `key` if present.
    fn remove(&self, key: &str);
}

/// Shared handle to a key-value store.
pub type SharedKv = Arc<dyn KvStore>;
