//! Discount coupon store.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use webshop_core::{Coupon, CouponId, DiscountKind};

use super::{Store, Subscription, load_or, persist_on_change};
use crate::kv::{SharedKv, keys};

/// Why a coupon code was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    #[error("Invalid coupon code")]
    InvalidCode,
    #[error("Coupon has expired")]
    Expired,
    #[error("Coupon usage limit exceeded")]
    UsageLimitExceeded,
    /// The order total is below the coupon's minimum, in minor units.
    #[error("Minimum order of ${} required", Decimal::new(*.0, 2))]
    MinimumOrderNotMet(i64),
}

/// A successfully validated coupon and the discount it grants, in minor units.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCoupon {
    pub coupon: Coupon,
    pub discount: i64,
}

/// Coupon list seeded with built-in defaults on first run.
///
/// `validate` and `apply` are separate steps with no transactional link:
/// two redemptions can both validate before either increments the usage
/// counter, so the limit can be overshot under interleaving.
pub struct CouponStore {
    coupons: Store<Vec<Coupon>>,
    _persist: Subscription<Vec<Coupon>>,
}

impl CouponStore {
    #[must_use]
    pub fn new(kv: SharedKv) -> Self {
        let coupons = Store::new(load_or(&kv, keys::COUPONS, default_coupons));
        let persist = persist_on_change(&coupons, kv, keys::COUPONS);
        Self {
            coupons,
            _persist: persist,
        }
    }

    #[must_use]
    pub fn list(&self) -> Vec<Coupon> {
        self.coupons.snapshot()
    }

    #[must_use]
    pub fn observe(&self) -> Store<Vec<Coupon>> {
        self.coupons.clone()
    }

    /// Validate a code against an order total (minor units).
    ///
    /// Checks run in a fixed order: code match among active coupons, validity
    /// window, usage limit, minimum order. The first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a [`CouponError`].
    pub fn validate(&self, code: &str, order_total: i64) -> Result<ValidatedCoupon, CouponError> {
        let now = Utc::now();
        self.coupons.read(|coupons| {
            let coupon = coupons
                .iter()
                .find(|c| c.active && c.code.eq_ignore_ascii_case(code))
                .ok_or(CouponError::InvalidCode)?;

            if !coupon.is_valid_at(now) {
                return Err(CouponError::Expired);
            }
            if !coupon.has_usage_left() {
                return Err(CouponError::UsageLimitExceeded);
            }
            if let Some(min_order) = coupon.min_order
                && order_total < min_order
            {
                return Err(CouponError::MinimumOrderNotMet(min_order));
            }

            let discount = match coupon.kind {
                DiscountKind::Percentage => {
                    let raw = order_total * coupon.value / 100;
                    match coupon.max_discount {
                        Some(cap) => raw.min(cap),
                        None => raw,
                    }
                }
                DiscountKind::Fixed => coupon.value.min(order_total),
                // Waived at the shipping stage, not off the item total.
                DiscountKind::FreeShipping => 0,
            };

            Ok(ValidatedCoupon {
                coupon: coupon.clone(),
                discount,
            })
        })
    }

    /// Mark a coupon as used once. Callers invoke this only after a
    /// successful order; there is no automatic link to order placement.
    pub fn apply(&self, coupon_id: &CouponId) {
        self.coupons.update(|coupons| {
            if let Some(coupon) = coupons.iter_mut().find(|c| &c.id == coupon_id) {
                coupon.used_count += 1;
            }
        });
    }

    /// Coupons that are active, within their validity window, and have usage
    /// remaining.
    #[must_use]
    pub fn get_active(&self) -> Vec<Coupon> {
        let now = Utc::now();
        self.coupons.read(|coupons| {
            coupons
                .iter()
                .filter(|c| c.active && c.is_valid_at(now) && c.has_usage_left())
                .cloned()
                .collect()
        })
    }

    /// Add a coupon (admin).
    pub fn add(&self, coupon: Coupon) {
        self.coupons.update(|coupons| coupons.push(coupon));
    }

    /// Remove a coupon (admin).
    pub fn remove(&self, coupon_id: &CouponId) {
        self.coupons
            .update(|coupons| coupons.retain(|c| &c.id != coupon_id));
    }

    /// Replace a coupon record in place (admin). No-op when absent.
    pub fn update(&self, coupon: Coupon) {
        self.coupons.update(|coupons| {
            if let Some(existing) = coupons.iter_mut().find(|c| c.id == coupon.id) {
                *existing = coupon;
            }
        });
    }

    /// Restore the built-in default coupons.
    pub fn reset(&self) {
        self.coupons.set(default_coupons());
    }
}

/// Built-in demo coupons, seeded on first run. Amounts are minor units.
fn default_coupons() -> Vec<Coupon> {
    let now = Utc::now();
    vec![
        Coupon {
            id: CouponId::new("welcome10"),
            code: "WELCOME10".to_string(),
            kind: DiscountKind::Percentage,
            value: 10,
            min_order: Some(5000),
            max_discount: None,
            valid_from: now,
            valid_until: now + Duration::days(30),
            usage_limit: Some(100),
            used_count: 0,
            active: true,
            description: "10% off on orders over $50".to_string(),
        },
        Coupon {
            id: CouponId::new("freeship"),
            code: "FREESHIP".to_string(),
            kind: DiscountKind::FreeShipping,
            value: 0,
            min_order: Some(7500),
            max_discount: None,
            valid_from: now,
            valid_until: now + Duration::days(60),
            usage_limit: Some(50),
            used_count: 0,
            active: true,
            description: "Free shipping on orders over $75".to_string(),
        },
        Coupon {
            id: CouponId::new("save20"),
            code: "SAVE20".to_string(),
            kind: DiscountKind::Fixed,
            value: 2000,
            min_order: None,
            max_discount: Some(2000),
            valid_from: now,
            valid_until: now + Duration::days(14),
            usage_limit: Some(25),
            used_count: 0,
            active: true,
            description: "$20 off any order".to_string(),
        },
    ]
}
