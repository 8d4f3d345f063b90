//! Stripe API client for hosted checkout sessions.
//!
//! Checkout is delegated entirely to Stripe: the storefront creates a
//! payment-mode session with the cart's line items and redirects the
//! customer to the hosted page. Webhooks report the outcome.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use webshop_core::Currency;

use crate::config::WebshopConfig;

/// Stripe REST API base URL.
const BASE_URL: &str = "https://api.stripe.com/v1";

/// Errors that can occur when interacting with the Stripe API.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client or parse a response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// One line item to charge at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutItem {
    pub name: String,
    /// Unit amount in minor units.
    pub amount: i64,
    pub currency: Currency,
    pub quantity: u32,
}

/// A created hosted checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted payment page URL to redirect the customer to.
    pub url: String,
}

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    base_url: String,
}

impl StripeClient {
    /// Create a new Stripe API client authenticated with the configured
    /// secret key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &WebshopConfig) -> Result<Self, PaymentError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.stripe_secret_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| PaymentError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Create a payment-mode checkout session for the given items.
    ///
    /// Success redirects to `{base_url}/?success=true`, cancellation to
    /// `{base_url}/cart?canceled=true`. The item count and summed amount are
    /// attached as session metadata.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or a non-success API status.
    pub async fn create_checkout_session(
        &self,
        items: &[CheckoutItem],
        base_url: &str,
    ) -> Result<CheckoutSession, PaymentError> {
        let params = session_params(items, base_url);
        let url = format!("{}/checkout/sessions", self.base_url);

        let response = self.client.post(&url).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))
    }
}

/// Form parameters for the checkout session create call.
fn session_params(items: &[CheckoutItem], base_url: &str) -> Vec<(String, String)> {
    let mut params = vec![
        ("mode".to_string(), "payment".to_string()),
        (
            "success_url".to_string(),
            format!("{base_url}/?success=true"),
        ),
        (
            "cancel_url".to_string(),
            format!("{base_url}/cart?canceled=true"),
        ),
    ];

    for (i, item) in items.iter().enumerate() {
        params.push((
            format!("line_items[{i}][price_data][currency]"),
            item.currency.lowercase_code().to_string(),
        ));
        params.push((
            format!("line_items[{i}][price_data][product_data][name]"),
            item.name.clone(),
        ));
        params.push((
            format!("line_items[{i}][price_data][unit_amount]"),
            item.amount.to_string(),
        ));
        params.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
    }

    let total: i64 = items
        .iter()
        .map(|item| item.amount * i64::from(item.quantity))
        .sum();
    params.push((
        "metadata[items_count]".to_string(),
        items.len().to_string(),
    ));
    params.push(("metadata[total_amount]".to_string(), total.to_string()));
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, amount: i64, quantity: u32) -> CheckoutItem {
        CheckoutItem {
            name: name.to_string(),
            amount,
            currency: Currency::Eur,
            quantity,
        }
    }

    fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_session_params_encode_line_items() {
        let params = session_params(&[item("Mug", 1200, 2), item("Shirt", 2500, 1)], "https://shop.test");

        assert_eq!(lookup(&params, "mode"), Some("payment"));
        assert_eq!(
            lookup(&params, "success_url"),
            Some("https://shop.test/?success=true")
        );
        assert_eq!(
            lookup(&params, "cancel_url"),
            Some("https://shop.test/cart?canceled=true")
        );
        assert_eq!(
            lookup(&params, "line_items[0][price_data][currency]"),
            Some("eur")
        );
        assert_eq!(
            lookup(&params, "line_items[0][price_data][product_data][name]"),
            Some("Mug")
        );
        assert_eq!(
            lookup(&params, "line_items[0][price_data][unit_amount]"),
            Some("1200")
        );
        assert_eq!(lookup(&params, "line_items[1][quantity]"), Some("1"));
    }

    #[test]
    fn test_session_params_metadata_totals() {
        let params = session_params(&[item("Mug", 1200, 2), item("Shirt", 2500, 1)], "https://shop.test");
        assert_eq!(lookup(&params, "metadata[items_count]"), Some("2"));
        assert_eq!(lookup(&params, "metadata[total_amount]"), Some("4900"));
    }
}
