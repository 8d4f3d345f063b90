//! Payment provider webhook handling.
//!
//! Events arrive as a discriminated envelope `{type, data: {object}}`.
//! Recognized kinds are logged; everything else is accepted and ignored so
//! the provider does not retry. Signature verification is out of scope for
//! this demo surface.

use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    kind: String,
    data: WebhookData,
}

#[derive(Debug, Deserialize)]
struct WebhookData {
    object: Value,
}

/// `POST /api/webhook`: process a provider event and acknowledge with "ok".
pub async fn handle_event(body: String) -> Result<&'static str, AppError> {
    let event: WebhookEvent =
        serde_json::from_str(&body).map_err(|e| AppError::Webhook(e.to_string()))?;

    match event.kind.as_str() {
        "checkout.session.completed" => {
            let session = &event.data.object;
            let session_id = session.get("id").and_then(Value::as_str).unwrap_or("");
            let customer_email = session
                .pointer("/customer_details/email")
                .and_then(Value::as_str)
                .unwrap_or("");
            let amount = session
                .get("amount_total")
                .and_then(Value::as_i64)
                .unwrap_or(0);
            let metadata = session.get("metadata").cloned().unwrap_or(Value::Null);
            tracing::info!(
                session_id,
                customer_email,
                amount,
                metadata = %metadata,
                "Payment completed"
            );
        }
        "payment_intent.succeeded" => {
            let payment_intent = event.data.object.get("id").and_then(Value::as_str).unwrap_or("");
            tracing::info!(payment_intent, "Payment intent succeeded");
        }
        "payment_intent.payment_failed" => {
            let payment_intent = event.data.object.get("id").and_then(Value::as_str).unwrap_or("");
            tracing::warn!(payment_intent, "Payment failed");
        }
        other => {
            tracing::debug!(kind = other, "Unhandled event type");
        }
    }

    Ok("ok")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_session_acknowledged() {
        let body = serde_json::json!({
            "type": "checkout.session.completed",
            "data": { "object": {
                "id": "cs_test_123",
                "customer_details": { "email": "buyer@example.com" },
                "amount_total": 4900,
                "metadata": { "items_count": "2", "total_amount": "4900" },
            }},
        })
        .to_string();
        assert_eq!(handle_event(body).await.expect("handled"), "ok");
    }

    #[tokio::test]
    async fn test_payment_intent_events_acknowledged() {
        for kind in ["payment_intent.succeeded", "payment_intent.payment_failed"] {
            let body = serde_json::json!({
                "type": kind,
                "data": { "object": { "id": "pi_test_123" } },
            })
            .to_string();
            assert_eq!(handle_event(body).await.expect("handled"), "ok");
        }
    }

    #[tokio::test]
    async fn test_unknown_event_kind_is_accepted() {
        let body = serde_json::json!({
            "type": "customer.subscription.deleted",
            "data": { "object": {} },
        })
        .to_string();
        assert_eq!(handle_event(body).await.expect("handled"), "ok");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let result = handle_event("not json".to_string()).await;
        assert!(matches!(result, Err(AppError::Webhook(_))));
    }

    #[tokio::test]
    async fn test_missing_envelope_fields_rejected() {
        let result = handle_event(r#"{"type":"checkout.session.completed"}"#.to_string()).await;
        assert!(matches!(result, Err(AppError::Webhook(_))));
    }
}
