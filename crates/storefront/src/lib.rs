//! Webshop Storefront - client-side state management and catalog query layer.
//!
//! # Architecture
//!
//! - [`catalog`] - static product list with query, filter, sort, and
//!   recommendation functions
//! - [`store`] - reactive stores (cart, coupons, favorites, orders, reviews,
//!   auth, settings) persisted to the key-value bridge on every mutation
//! - [`kv`] - the persistence bridge: a synchronous string key-value store
//!   with file-backed and in-memory implementations
//! - [`routes`] - the checkout and payment-webhook HTTP surface (axum)
//! - [`services`] - payment provider API client
//!
//! There is no database and no server-side persistence: all state lives in
//! the reactive stores, mirrored best-effort to the key-value bridge.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod kv;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
