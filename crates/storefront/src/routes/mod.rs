//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health        - Liveness check
//! POST /api/checkout  - Create a hosted checkout session
//! POST /api/webhook   - Payment provider event notifications
//! ```

mod checkout;
mod webhook;

use axum::Router;
use axum::routing::post;

use crate::state::AppState;

/// All API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/checkout", post(checkout::create_session))
        .route("/api/webhook", post(webhook::handle_event))
}
