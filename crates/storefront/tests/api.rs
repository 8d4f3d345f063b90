//! HTTP surface tests driving the router directly, no network.
//!
//! The application state is built over the in-memory key-value backend; the
//! checkout tests only cover the validation path, so no payment provider
//! calls are made.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use webshop_storefront::config::WebshopConfig;
use webshop_storefront::kv::MemoryKv;
use webshop_storefront::routes;
use webshop_storefront::state::AppState;

// =============================================================================
// Helpers
// =============================================================================

fn test_config() -> WebshopConfig {
    WebshopConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: "https://shop.test".to_string(),
        data_dir: PathBuf::from("unused"),
        stripe_secret_key: SecretString::from("sk_test_x"),
    }
}

fn app() -> Router {
    let state = AppState::with_kv(test_config(), Arc::new(MemoryKv::new())).expect("state");
    routes::routes().with_state(state)
}

async fn post(uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("request");
    app().oneshot(request).await.expect("response")
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_rejects_invalid_items_with_details() {
    let body = json!({
        "items": [
            { "name": "", "amount": 0, "currency": "EUR", "quantity": 1 },
        ],
    })
    .to_string();
    let response = post("/api/checkout", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = body_json(response).await;
    assert_eq!(payload["error"], "Invalid payload");
    let details = payload["details"].as_array().expect("details array");
    assert_eq!(details.len(), 2);
    assert!(details[0].as_str().expect("str").contains("items[0].name"));
    assert!(details[1].as_str().expect("str").contains("items[0].amount"));
}

#[tokio::test]
async fn test_checkout_rejects_unknown_currency() {
    let body = json!({
        "items": [
            { "name": "Mug", "amount": 1200, "currency": "GBP", "quantity": 1 },
        ],
    })
    .to_string();
    let response = post("/api/checkout", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = body_json(response).await;
    assert!(
        payload["details"][0]
            .as_str()
            .expect("str")
            .contains("expected EUR, USD or CHF")
    );
}

#[tokio::test]
async fn test_checkout_rejects_malformed_json_with_same_shape() {
    let response = post("/api/checkout", "{not json".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = body_json(response).await;
    assert_eq!(payload["error"], "Invalid payload");
    assert!(payload["details"].as_array().is_some());
}

// =============================================================================
// Webhook
// =============================================================================

#[tokio::test]
async fn test_webhook_acknowledges_completed_session() {
    let body = json!({
        "type": "checkout.session.completed",
        "data": { "object": {
            "id": "cs_test_123",
            "customer_details": { "email": "buyer@example.com" },
            "amount_total": 4900,
        }},
    })
    .to_string();
    let response = post("/api/webhook", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_webhook_acknowledges_unknown_event_kind() {
    let body = json!({
        "type": "invoice.paid",
        "data": { "object": {} },
    })
    .to_string();
    let response = post("/api/webhook", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_webhook_rejects_malformed_body() {
    let response = post("/api/webhook", "not json".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = body_json(response).await;
    assert_eq!(payload["error"], "Webhook processing failed");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = post("/api/nope", String::new()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
