//! Webshop Core - Shared domain types.
//!
//! This crate provides the domain records used across the Webshop components:
//! - `storefront` - the storefront binary (stores, catalog, checkout surface)
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients, no persistence. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, products, cart lines, coupons, orders, reviews,
//!   users, and price formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
