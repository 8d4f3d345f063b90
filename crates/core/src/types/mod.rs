//! Core types for the Webshop storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod coupon;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod review;
pub mod user;

pub use cart::CartLine;
pub use coupon::{Coupon, DiscountKind};
pub use id::*;
pub use order::{
    NewOrder, Order, OrderLine, OrderStatus, PaymentInfo, PaymentStatus, ShippingInfo, StatusEntry,
};
pub use price::{format_price, format_price_plain};
pub use product::{Currency, Product, SlugError, validate_slug};
pub use review::Review;
pub use user::{Role, User};
