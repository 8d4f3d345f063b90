//! Application error type for the HTTP surface.
//!
//! All route handlers return `Result<T, AppError>`. Responses never expose
//! internal detail: external failures are logged server-side and surfaced as
//! a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::services::stripe::PaymentError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed validation; `details` lists offending fields.
    #[error("Invalid payload")]
    InvalidPayload { details: Vec<String> },

    /// Payment provider call failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Webhook body could not be processed.
    #[error("Webhook processing failed: {0}")]
    Webhook(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidPayload { details } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid payload", "details": details })),
            )
                .into_response(),
            Self::Payment(err) => {
                tracing::error!(error = %err, "Checkout session creation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error",
                        "message": "Failed to create checkout session",
                    })),
                )
                    .into_response()
            }
            Self::Webhook(reason) => {
                tracing::error!(error = %reason, "Webhook processing failed");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Webhook processing failed" })),
                )
                    .into_response()
            }
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("Not found: {what}") })),
            )
                .into_response(),
            Self::Internal(err) => {
                tracing::error!(error = %err, "Request error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
