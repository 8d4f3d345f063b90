//! Reactive stores.
//!
//! A [`Store`] is an observable state container: mutations publish a new
//! snapshot to all subscribers synchronously, on the mutating call. Domain
//! stores (cart, coupons, favorites, orders, reviews, auth, settings) wrap a
//! `Store` and attach a persistence subscription that mirrors every snapshot
//! to the key-value bridge, plus derived stores recomputed from the source.
//!
//! Stores are constructed explicitly with an injected [`SharedKv`] and
//! assembled into [`Stores`]; there are no process-wide singletons.

pub mod auth;
pub mod cart;
pub mod coupons;
pub mod favorites;
pub mod orders;
pub mod reviews;
pub mod settings;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::kv::SharedKv;

pub use auth::AuthStore;
pub use cart::CartStore;
pub use coupons::CouponStore;
pub use favorites::FavoritesStore;
pub use orders::OrdersStore;
pub use reviews::ReviewsStore;
pub use settings::SettingsStore;

/// Persisted snapshot schema version. Bump on incompatible shape changes;
/// older versions are discarded on load and fall back to defaults.
const SNAPSHOT_VERSION: u32 = 1;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Shared<T> {
    state: RwLock<T>,
    listeners: Mutex<Vec<(u64, Listener<T>)>>,
    next_listener_id: AtomicU64,
}

/// An observable state container.
///
/// Subscribers are invoked immediately on subscription with the current
/// value, then synchronously after every mutation. Listeners are called
/// outside the state lock, so they may freely read the store.
pub struct Store<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a store holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(initial),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> T {
        self.read(Clone::clone)
    }

    /// Run a closure against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.shared.state.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Replace the state and notify subscribers.
    pub fn set(&self, value: T) {
        self.update(|state| *state = value);
    }

    /// Mutate the state in place and notify subscribers.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, snapshot) = {
            let mut guard = match self.shared.state.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let result = f(&mut guard);
            (result, guard.clone())
        };
        self.notify(&snapshot);
        result
    }

    /// Register a listener. It is invoked immediately with the current value
    /// and after every subsequent mutation, until the returned
    /// [`Subscription`] is dropped.
    #[must_use]
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription<T> {
        let listener: Listener<T> = Arc::new(listener);
        let id = self.shared.next_listener_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut listeners) = self.shared.listeners.lock() {
            listeners.push((id, Arc::clone(&listener)));
        }
        let snapshot = self.snapshot();
        listener(&snapshot);
        Subscription {
            shared: Arc::downgrade(&self.shared),
            id,
        }
    }

    fn notify(&self, snapshot: &T) {
        // Snapshot the listener list so listeners can subscribe/unsubscribe
        // from within a notification without deadlocking.
        let listeners: Vec<Listener<T>> = match self.shared.listeners.lock() {
            Ok(guard) => guard.iter().map(|(_, l)| Arc::clone(l)).collect(),
            Err(_) => return,
        };
        for listener in listeners {
            listener(snapshot);
        }
    }
}

/// Handle keeping a store subscription alive; dropping it unsubscribes.
pub struct Subscription<T> {
    shared: Weak<Shared<T>>,
    id: u64,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade()
            && let Ok(mut listeners) = shared.listeners.lock()
        {
            listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Build a derived store recomputed from `source` on every change.
///
/// The returned subscription must be kept alive for the derived store to
/// keep tracking the source.
pub fn derive<T, U>(
    source: &Store<T>,
    f: impl Fn(&T) -> U + Send + Sync + 'static,
) -> (Store<U>, Subscription<T>)
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let derived = Store::new(source.read(|state| f(state)));
    let target = derived.clone();
    let recompute = Arc::clone(&f);
    let subscription = source.subscribe(move |state| target.set(recompute(state)));
    (derived, subscription)
}

// =============================================================================
// Snapshot persistence
// =============================================================================

/// Versioned envelope wrapped around every persisted snapshot.
#[derive(Debug, Serialize, serde::Deserialize)]
struct Snapshot<T> {
    version: u32,
    data: T,
}

/// Load a persisted snapshot, falling back to `default` when the key is
/// missing, the JSON is malformed, or the schema version does not match.
/// Corrupt data never fails initialization.
pub(crate) fn load_or<T: DeserializeOwned>(
    kv: &SharedKv,
    key: &str,
    default: impl FnOnce() -> T,
) -> T {
    let Some(raw) = kv.get(key) else {
        return default();
    };
    match serde_json::from_str::<Snapshot<T>>(&raw) {
        Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => snapshot.data,
        Ok(snapshot) => {
            tracing::warn!(
                key,
                found = snapshot.version,
                expected = SNAPSHOT_VERSION,
                "Discarding persisted snapshot with unsupported version"
            );
            default()
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed persisted snapshot");
            default()
        }
    }
}

/// Serialize and write a snapshot under `key`. Best-effort: serialization
/// failures are logged, never surfaced.
pub(crate) fn persist<T: Serialize>(kv: &SharedKv, key: &str, data: &T) {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        data,
    };
    match serde_json::to_string(&snapshot) {
        Ok(json) => kv.set(key, &json),
        Err(e) => tracing::warn!(key, error = %e, "Failed to serialize snapshot"),
    }
}

/// Attach a subscription that persists every snapshot of `store` under `key`.
pub(crate) fn persist_on_change<T>(
    store: &Store<T>,
    kv: SharedKv,
    key: &'static str,
) -> Subscription<T>
where
    T: Clone + Serialize + Send + Sync + 'static,
{
    store.subscribe(move |state| persist(&kv, key, state))
}

/// All domain stores, constructed against one key-value bridge.
///
/// This is the dependency-injection container carried in the application
/// state; nothing here is global.
pub struct Stores {
    pub cart: CartStore,
    pub coupons: CouponStore,
    pub favorites: FavoritesStore,
    pub orders: OrdersStore,
    pub reviews: ReviewsStore,
    pub auth: AuthStore,
    pub settings: SettingsStore,
}

impl Stores {
    /// Construct every store, loading persisted snapshots from `kv`.
    #[must_use]
    pub fn new(kv: SharedKv) -> Self {
        Self {
            cart: CartStore::new(Arc::clone(&kv)),
            coupons: CouponStore::new(Arc::clone(&kv)),
            favorites: FavoritesStore::new(Arc::clone(&kv)),
            orders: OrdersStore::new(Arc::clone(&kv)),
            reviews: ReviewsStore::new(Arc::clone(&kv)),
            auth: AuthStore::new(Arc::clone(&kv)),
            settings: SettingsStore::new(kv),
        }
    }
}
