//! End-to-end shopping flow over the file-backed key-value bridge.
//!
//! Exercises the same persistence path the binary uses: every store mutation
//! is mirrored to disk, and a fresh set of stores built over the same data
//! directory observes the previous session's state.

use std::path::PathBuf;
use std::sync::Arc;

use webshop_core::{
    Currency, NewOrder, OrderStatus, PaymentInfo, PaymentStatus, Product, ShippingInfo,
};
use webshop_storefront::catalog::Catalog;
use webshop_storefront::kv::{FileKv, SharedKv, keys};
use webshop_storefront::store::Stores;
use webshop_storefront::store::settings::{LogLevel, Theme};

// =============================================================================
// Helpers
// =============================================================================

fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("webshop-flow-{}", uuid::Uuid::new_v4()))
}

fn open_kv(dir: &PathBuf) -> SharedKv {
    Arc::new(FileKv::open(dir).expect("create data dir"))
}

fn shipping(email: &str) -> ShippingInfo {
    ShippingInfo {
        first_name: "Test".to_string(),
        last_name: "Customer".to_string(),
        email: email.to_string(),
        phone: String::new(),
        address: "1 Test Lane".to_string(),
        city: "Testville".to_string(),
        zip_code: "00000".to_string(),
        country: "Testland".to_string(),
        method: "Standard Shipping".to_string(),
        cost: 0,
    }
}

fn order_for(email: &str, subtotal: i64, discount: i64) -> NewOrder {
    let total = subtotal - discount;
    NewOrder {
        customer: shipping(email),
        lines: vec![],
        subtotal,
        tax: 0,
        shipping: 0,
        discount,
        total,
        currency: Currency::Eur,
        status: OrderStatus::Pending,
        payment: PaymentInfo {
            method: "Credit Card".to_string(),
            status: PaymentStatus::Pending,
            transaction_id: None,
            amount: total,
            currency: Currency::Eur,
        },
        estimated_delivery: None,
        tracking_number: None,
        notes: None,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_shopping_flow_survives_restart() {
    let dir = temp_data_dir();
    let catalog = Catalog::builtin();
    let products: Vec<Product> = catalog.list().into_iter().cloned().collect();
    let first = products[0].clone();
    let second = products[1].clone();

    // First session: shop, redeem a coupon, place the order.
    let (order_number, expected_total, discount) = {
        let stores = Stores::new(open_kv(&dir));
        stores.cart.add(first.clone(), 2);
        stores.cart.add(second.clone(), 1);
        let subtotal = first.price * 2 + second.price;
        assert_eq!(stores.cart.total(), subtotal);

        stores.favorites.add(&first);

        // SAVE20 has no minimum order, so validation is deterministic here.
        let validated = stores.coupons.validate("SAVE20", subtotal).expect("valid");
        assert_eq!(validated.discount, 2000_i64.min(subtotal));

        let order = stores
            .orders
            .create(order_for("buyer@example.com", subtotal, validated.discount));
        stores.coupons.apply(&validated.coupon.id);
        stores.cart.clear();
        stores.settings.set_theme(Theme::Dark);
        stores.settings.set_log_level(LogLevel::Debug);

        (order.order_number, order.total, validated.discount)
    };

    // Second session over the same directory observes everything.
    let stores = Stores::new(open_kv(&dir));
    assert!(stores.cart.lines().is_empty());
    assert!(stores.favorites.is_favorite(&first.id));

    let order = stores
        .orders
        .get_by_order_number(&order_number)
        .expect("order persisted");
    assert_eq!(order.total, expected_total);
    assert_eq!(order.discount, discount);

    let save20 = stores
        .coupons
        .list()
        .into_iter()
        .find(|c| c.code == "SAVE20")
        .expect("seeded");
    assert_eq!(save20.used_count, 1);

    assert_eq!(stores.settings.theme(), Theme::Dark);
    assert_eq!(stores.settings.log_level(), LogLevel::Debug);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_snapshot_on_disk_falls_back_to_defaults() {
    let dir = temp_data_dir();
    {
        let kv = open_kv(&dir);
        kv.set(keys::CART, "{truncated");
        kv.set(keys::COUPONS, "[[[");
    }

    let stores = Stores::new(open_kv(&dir));
    assert!(stores.cart.lines().is_empty());
    // Coupons reseed their built-in defaults.
    assert_eq!(stores.coupons.list().len(), 3);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_orders_accumulate_across_sessions() {
    let dir = temp_data_dir();
    {
        let stores = Stores::new(open_kv(&dir));
        stores.orders.clear();
        stores.orders.create(order_for("a@example.com", 1000, 0));
    }
    {
        let stores = Stores::new(open_kv(&dir));
        stores.orders.create(order_for("a@example.com", 2000, 0));
    }

    let stores = Stores::new(open_kv(&dir));
    let stats = stores.orders.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.revenue, 3000);

    let _ = std::fs::remove_dir_all(&dir);
}
