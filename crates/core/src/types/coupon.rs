//! Discount coupon record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::CouponId;

/// How a coupon discounts an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage of the order total, optionally capped by `max_discount`.
    Percentage,
    /// Fixed amount in minor units, never exceeding the order total.
    Fixed,
    /// Shipping is waived at checkout; the discount amount itself is 0.
    FreeShipping,
}

/// A discount code.
///
/// Monetary fields (`value` for fixed coupons, `min_order`, `max_discount`)
/// are minor currency units. `value` for percentage coupons is the percentage
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    /// Matched case-insensitively against user input.
    pub code: String,
    pub kind: DiscountKind,
    pub value: i64,
    #[serde(default)]
    pub min_order: Option<i64>,
    /// Cap for percentage discounts.
    #[serde(default)]
    pub max_discount: Option<i64>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    pub used_count: u32,
    pub active: bool,
    pub description: String,
}

impl Coupon {
    /// Whether the usage limit (if any) still has redemptions left.
    #[must_use]
    pub fn has_usage_left(&self) -> bool {
        self.usage_limit.is_none_or(|limit| self.used_count < limit)
    }

    /// Whether `now` falls inside the validity window.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.valid_from && now <= self.valid_until
    }
}
