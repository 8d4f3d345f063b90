//! Checkout session creation.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use webshop_core::Currency;

use crate::error::AppError;
use crate::services::stripe::CheckoutItem;
use crate::state::AppState;

/// Request body for `POST /api/checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<ItemInput>,
}

/// One requested line item, validated before reaching the payment provider.
#[derive(Debug, Deserialize)]
pub struct ItemInput {
    pub name: String,
    /// Unit amount in minor units; must be a positive integer.
    pub amount: i64,
    /// Uppercase ISO code; EUR, USD, and CHF are accepted.
    pub currency: String,
    /// Must be a positive integer.
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub id: String,
    pub url: String,
}

/// `POST /api/checkout`: validate the payload and create a hosted checkout
/// session with the payment provider.
///
/// The body is parsed by hand so malformed JSON yields the same 400 shape as
/// field-level validation failures.
pub async fn create_session(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<CheckoutResponse>, AppError> {
    let request: CheckoutRequest =
        serde_json::from_str(&body).map_err(|e| AppError::InvalidPayload {
            details: vec![format!("body: {e}")],
        })?;

    let items = validate_items(&request)?;
    let session = state
        .stripe()
        .create_checkout_session(&items, &state.config().base_url)
        .await?;

    tracing::info!(session_id = %session.id, items = items.len(), "Checkout session created");
    Ok(Json(CheckoutResponse {
        id: session.id,
        url: session.url,
    }))
}

fn validate_items(request: &CheckoutRequest) -> Result<Vec<CheckoutItem>, AppError> {
    let mut details = Vec::new();
    let mut items = Vec::new();

    for (i, item) in request.items.iter().enumerate() {
        if item.name.is_empty() {
            details.push(format!("items[{i}].name: must not be empty"));
        }
        if item.amount <= 0 {
            details.push(format!("items[{i}].amount: must be a positive integer"));
        }
        let quantity = if item.quantity <= 0 {
            details.push(format!("items[{i}].quantity: must be a positive integer"));
            None
        } else if let Ok(quantity) = u32::try_from(item.quantity) {
            Some(quantity)
        } else {
            details.push(format!(
                "items[{i}].quantity: exceeds the maximum of {}",
                u32::MAX
            ));
            None
        };
        let currency = match item.currency.as_str() {
            "EUR" => Some(Currency::Eur),
            "USD" => Some(Currency::Usd),
            "CHF" => Some(Currency::Chf),
            other => {
                details.push(format!(
                    "items[{i}].currency: expected EUR, USD or CHF, got {other:?}"
                ));
                None
            }
        };

        if details.is_empty()
            && let (Some(currency), Some(quantity)) = (currency, quantity)
        {
            items.push(CheckoutItem {
                name: item.name.clone(),
                amount: item.amount,
                currency,
                quantity,
            });
        }
    }

    if details.is_empty() {
        Ok(items)
    } else {
        Err(AppError::InvalidPayload { details })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(items: Vec<ItemInput>) -> CheckoutRequest {
        CheckoutRequest { items }
    }

    fn item(amount: i64, currency: &str, quantity: i64) -> ItemInput {
        ItemInput {
            name: "Mug".to_string(),
            amount,
            currency: currency.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_valid_items_pass() {
        let items = validate_items(&request(vec![item(1200, "EUR", 2)])).expect("valid");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].currency, Currency::Eur);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_nonpositive_amount_and_quantity_rejected() {
        let err = validate_items(&request(vec![item(0, "EUR", -1)])).expect_err("invalid");
        let AppError::InvalidPayload { details } = err else {
            panic!("expected InvalidPayload");
        };
        assert_eq!(details.len(), 2);
        assert!(details[0].contains("items[0].amount"));
        assert!(details[1].contains("items[0].quantity"));
    }

    #[test]
    fn test_quantity_above_u32_range_rejected() {
        let err =
            validate_items(&request(vec![item(1200, "EUR", i64::from(u32::MAX) + 1)]))
                .expect_err("invalid");
        let AppError::InvalidPayload { details } = err else {
            panic!("expected InvalidPayload");
        };
        assert!(details[0].contains("items[0].quantity: exceeds the maximum"));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let err = validate_items(&request(vec![item(1200, "GBP", 1)])).expect_err("invalid");
        let AppError::InvalidPayload { details } = err else {
            panic!("expected InvalidPayload");
        };
        assert!(details[0].contains("expected EUR, USD or CHF"));
    }

    #[test]
    fn test_errors_reported_across_all_items() {
        let err = validate_items(&request(vec![item(1200, "EUR", 1), item(-5, "USD", 1)]))
            .expect_err("invalid");
        let AppError::InvalidPayload { details } = err else {
            panic!("expected InvalidPayload");
        };
        assert!(details.iter().any(|d| d.contains("items[1].amount")));
    }
}
