//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::WebshopConfig;
use crate::kv::{FileKv, SharedKv};
use crate::services::stripe::{PaymentError, StripeClient};
use crate::store::Stores;

/// Error creating the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to open data directory: {0}")]
    DataDir(#[from] std::io::Error),
    #[error("failed to build payment client: {0}")]
    Payment(#[from] PaymentError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Every store is constructed here against one
/// key-value bridge; handlers reach everything through this type.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebshopConfig,
    catalog: Catalog,
    stores: Stores,
    stripe: StripeClient,
}

impl AppState {
    /// Create the application state: opens the file-backed key-value bridge
    /// under the configured data directory, loads all persisted stores, and
    /// builds the payment client.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// payment client fails to build.
    pub fn new(config: WebshopConfig) -> Result<Self, StateError> {
        let kv: SharedKv = Arc::new(FileKv::open(&config.data_dir)?);
        Ok(Self::with_kv(config, kv)?)
    }

    /// Create the state against an explicit key-value bridge. Used by tests
    /// with the in-memory backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment client fails to build.
    pub fn with_kv(config: WebshopConfig, kv: SharedKv) -> Result<Self, PaymentError> {
        let stripe = StripeClient::new(&config)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                stores: Stores::new(kv),
                catalog: Catalog::builtin(),
                config,
                stripe,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &WebshopConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn stores(&self) -> &Stores {
        &self.inner.stores
    }

    #[must_use]
    pub fn stripe(&self) -> &StripeClient {
        &self.inner.stripe
    }
}
