//! Order history store.

use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use std::collections::HashMap;
use uuid::Uuid;
use webshop_core::{
    Currency, NewOrder, Order, OrderId, OrderLine, OrderStatus, PaymentInfo, PaymentStatus,
    ProductId, ShippingInfo, StatusEntry,
};

use super::{Store, Subscription, derive, load_or, persist_on_change};
use crate::kv::{SharedKv, keys};

/// Reactive aggregate recomputed on every order mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderAggregate {
    pub total_orders: usize,
    /// Revenue across all orders, cancelled included, in minor units.
    pub total_revenue: i64,
    pub pending_orders: usize,
    pub processing_orders: usize,
}

/// Point-in-time order statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderStats {
    pub total: usize,
    pub by_status: HashMap<OrderStatus, usize>,
    /// Revenue excluding cancelled orders, in minor units.
    pub revenue: i64,
}

/// Order list seeded with two demonstration orders on first run.
///
/// Status transitions are permissive: any status can follow any other, and
/// every change appends to the order's history.
pub struct OrdersStore {
    orders: Store<Vec<Order>>,
    aggregate: Store<OrderAggregate>,
    _subscriptions: Vec<Subscription<Vec<Order>>>,
}

impl OrdersStore {
    #[must_use]
    pub fn new(kv: SharedKv) -> Self {
        let orders = Store::new(load_or(&kv, keys::ORDERS, demo_orders));
        let persist = persist_on_change(&orders, kv, keys::ORDERS);
        let (aggregate, aggregate_sub) = derive(&orders, |orders: &Vec<Order>| {
            let mut agg = OrderAggregate {
                total_orders: orders.len(),
                ..OrderAggregate::default()
            };
            for order in orders {
                agg.total_revenue += order.total;
                match order.status {
                    OrderStatus::Pending => agg.pending_orders += 1,
                    OrderStatus::Processing => agg.processing_orders += 1,
                    _ => {}
                }
            }
            agg
        });
        Self {
            orders,
            aggregate,
            _subscriptions: vec![persist, aggregate_sub],
        }
    }

    #[must_use]
    pub fn list(&self) -> Vec<Order> {
        self.orders.snapshot()
    }

    #[must_use]
    pub fn observe(&self) -> Store<Vec<Order>> {
        self.orders.clone()
    }

    #[must_use]
    pub fn aggregate(&self) -> OrderAggregate {
        self.aggregate.snapshot()
    }

    /// Place an order: assigns the identifier, a human-readable order number,
    /// timestamps, and an initial "Order created" history entry matching the
    /// supplied status. Order numbers are random; collisions are possible in
    /// principle but never checked for.
    pub fn create(&self, input: NewOrder) -> Order {
        let now = Utc::now();
        let order = Order {
            id: OrderId::new(Uuid::new_v4().to_string()),
            order_number: generate_order_number(now),
            customer: input.customer,
            lines: input.lines,
            subtotal: input.subtotal,
            tax: input.tax,
            shipping: input.shipping,
            discount: input.discount,
            total: input.total,
            currency: input.currency,
            status: input.status,
            status_history: vec![StatusEntry {
                status: input.status,
                timestamp: now,
                note: Some("Order created".to_string()),
            }],
            payment: input.payment,
            created_at: now,
            updated_at: now,
            estimated_delivery: input.estimated_delivery,
            tracking_number: input.tracking_number,
            notes: input.notes,
        };
        tracing::debug!(order_number = %order.order_number, "Order created");
        self.orders.update(|orders| orders.push(order.clone()));
        order
    }

    #[must_use]
    pub fn get_by_id(&self, order_id: &OrderId) -> Option<Order> {
        self.orders
            .read(|orders| orders.iter().find(|o| &o.id == order_id).cloned())
    }

    #[must_use]
    pub fn get_by_order_number(&self, order_number: &str) -> Option<Order> {
        self.orders.read(|orders| {
            orders
                .iter()
                .find(|o| o.order_number == order_number)
                .cloned()
        })
    }

    /// Set a new status and append a history entry. Absent orders are a
    /// no-op. A missing note defaults to "Status changed to <status>".
    pub fn update_status(&self, order_id: &OrderId, status: OrderStatus, note: Option<String>) {
        self.orders.update(|orders| {
            if let Some(order) = orders.iter_mut().find(|o| &o.id == order_id) {
                let now = Utc::now();
                order.status = status;
                order.updated_at = now;
                order.status_history.push(StatusEntry {
                    status,
                    timestamp: now,
                    note: Some(note.unwrap_or_else(|| format!("Status changed to {status}"))),
                });
            }
        });
    }

    /// Cancel an order. The note defaults to "Order cancelled by customer".
    pub fn cancel(&self, order_id: &OrderId, reason: Option<String>) {
        let note = reason.unwrap_or_else(|| "Order cancelled by customer".to_string());
        self.update_status(order_id, OrderStatus::Cancelled, Some(note));
    }

    pub fn add_tracking_number(&self, order_id: &OrderId, tracking_number: &str) {
        self.orders.update(|orders| {
            if let Some(order) = orders.iter_mut().find(|o| &o.id == order_id) {
                order.tracking_number = Some(tracking_number.to_string());
                order.updated_at = Utc::now();
            }
        });
    }

    pub fn set_estimated_delivery(&self, order_id: &OrderId, estimated: DateTime<Utc>) {
        self.orders.update(|orders| {
            if let Some(order) = orders.iter_mut().find(|o| &o.id == order_id) {
                order.estimated_delivery = Some(estimated);
                order.updated_at = Utc::now();
            }
        });
    }

    /// A customer's orders, matched case-insensitively by email, newest first.
    #[must_use]
    pub fn by_customer_email(&self, email: &str) -> Vec<Order> {
        self.orders.read(|orders| {
            let mut matched: Vec<Order> = orders
                .iter()
                .filter(|o| o.customer.email.eq_ignore_ascii_case(email))
                .cloned()
                .collect();
            matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            matched
        })
    }

    /// Per-status counts and revenue. Cancelled orders are excluded from
    /// revenue but still counted.
    #[must_use]
    pub fn stats(&self) -> OrderStats {
        self.orders.read(|orders| {
            let mut stats = OrderStats {
                total: orders.len(),
                ..OrderStats::default()
            };
            for order in orders {
                *stats.by_status.entry(order.status).or_insert(0) += 1;
                if order.status != OrderStatus::Cancelled {
                    stats.revenue += order.total;
                }
            }
            stats
        })
    }

    /// Delete an order outright (admin).
    pub fn remove(&self, order_id: &OrderId) {
        self.orders
            .update(|orders| orders.retain(|o| &o.id != order_id));
    }

    pub fn clear(&self) {
        self.orders.set(Vec::new());
    }
}

/// `ORD-<unix millis>-<6 random uppercase alphanumerics>`.
fn generate_order_number(now: DateTime<Utc>) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::rng();
    let suffix: String = (0..6)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect();
    format!("ORD-{}-{}", now.timestamp_millis(), suffix)
}

/// Two demonstration orders seeded on first run. Amounts are minor units.
fn demo_orders() -> Vec<Order> {
    let at = |y: i32, mo: u32, d: u32, h: u32, mi: u32| {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap_or_default()
    };
    let entry = |status: OrderStatus, ts: DateTime<Utc>, note: &str| StatusEntry {
        status,
        timestamp: ts,
        note: Some(note.to_string()),
    };
    vec![
        Order {
            id: OrderId::new("demo-order-1"),
            order_number: "ORD-123456789-ABCDEF".to_string(),
            customer: ShippingInfo {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                email: "user@example.com".to_string(),
                phone: "+1 (555) 123-4567".to_string(),
                address: "123 Main Street".to_string(),
                city: "New York".to_string(),
                zip_code: "10001".to_string(),
                country: "United States".to_string(),
                method: "Standard Shipping".to_string(),
                cost: 599,
            },
            lines: vec![
                OrderLine {
                    id: "item-1".to_string(),
                    product_id: ProductId::new("p1"),
                    name: "Classic T-Shirt".to_string(),
                    price: 1999,
                    quantity: 2,
                    image: "/img/tshirt.png".to_string(),
                },
                OrderLine {
                    id: "item-2".to_string(),
                    product_id: ProductId::new("p2"),
                    name: "Coffee Mug".to_string(),
                    price: 1299,
                    quantity: 1,
                    image: "/img/mug.png".to_string(),
                },
            ],
            subtotal: 5297,
            tax: 424,
            shipping: 599,
            discount: 0,
            total: 6320,
            currency: Currency::Usd,
            status: OrderStatus::Shipped,
            status_history: vec![
                entry(OrderStatus::Pending, at(2024, 1, 15, 10, 30), "Order created"),
                entry(OrderStatus::Confirmed, at(2024, 1, 15, 11, 0), "Payment confirmed"),
                entry(OrderStatus::Processing, at(2024, 1, 15, 14, 30), "Order being prepared"),
                entry(OrderStatus::Shipped, at(2024, 1, 16, 9, 15), "Package shipped via UPS"),
            ],
            payment: PaymentInfo {
                method: "Credit Card".to_string(),
                status: PaymentStatus::Completed,
                transaction_id: Some("txn_123456789".to_string()),
                amount: 6320,
                currency: Currency::Usd,
            },
            created_at: at(2024, 1, 15, 10, 30),
            updated_at: at(2024, 1, 16, 9, 15),
            estimated_delivery: Some(at(2024, 1, 20, 17, 0)),
            tracking_number: Some("1Z999AA1234567890".to_string()),
            notes: None,
        },
        Order {
            id: OrderId::new("demo-order-2"),
            order_number: "ORD-987654321-FEDCBA".to_string(),
            customer: ShippingInfo {
                first_name: "Jane".to_string(),
                last_name: "Smith".to_string(),
                email: "user@example.com".to_string(),
                phone: "+1 (555) 987-6543".to_string(),
                address: "456 Oak Avenue".to_string(),
                city: "Los Angeles".to_string(),
                zip_code: "90210".to_string(),
                country: "United States".to_string(),
                method: "Express Shipping".to_string(),
                cost: 1299,
            },
            lines: vec![OrderLine {
                id: "item-3".to_string(),
                product_id: ProductId::new("p3"),
                name: "Stickers Pack".to_string(),
                price: 899,
                quantity: 3,
                image: "/img/sticker.png".to_string(),
            }],
            subtotal: 2697,
            tax: 216,
            shipping: 1299,
            discount: 500,
            total: 3612,
            currency: Currency::Usd,
            status: OrderStatus::Delivered,
            status_history: vec![
                entry(OrderStatus::Pending, at(2024, 1, 10, 15, 45), "Order created"),
                entry(OrderStatus::Confirmed, at(2024, 1, 10, 16, 0), "Payment confirmed"),
                entry(OrderStatus::Processing, at(2024, 1, 11, 10, 30), "Order being prepared"),
                entry(OrderStatus::Shipped, at(2024, 1, 11, 14, 20), "Package shipped via FedEx"),
                entry(OrderStatus::Delivered, at(2024, 1, 13, 11, 30), "Package delivered successfully"),
            ],
            payment: PaymentInfo {
                method: "PayPal".to_string(),
                status: PaymentStatus::Completed,
                transaction_id: Some("paypal_txn_987654321".to_string()),
                amount: 3612,
                currency: Currency::Usd,
            },
            created_at: at(2024, 1, 10, 15, 45),
            updated_at: at(2024, 1, 13, 11, 30),
            estimated_delivery: Some(at(2024, 1, 15, 17, 0)),
            tracking_number: Some("7777 7777 7777".to_string()),
            notes: None,
        },
    ]
}
