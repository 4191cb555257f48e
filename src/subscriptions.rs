//! Subscription management API client and checkout property formatting.
//!
//! Subscriptions themselves are created by the external checkout; this
//! client covers post-purchase management (frequency changes, pause/resume,
//! cancellation, charge skipping) plus the property map the checkout bridge
//! attaches to subscribed line items.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::Value;

use crate::config;
use crate::error::{Result, StorefrontError};
use crate::models::SubscriptionTerms;

// ---------------------------------------------------------------------------
// Checkout property formatting
// ---------------------------------------------------------------------------

/// Property map sent under `items[i][properties][...]` for a subscribed item.
///
/// `discount_percentage` is the fixed promotional rate, deliberately not the
/// per-item percent; subscription pricing itself travels separately.
pub fn checkout_properties(terms: &SubscriptionTerms) -> Vec<(String, String)> {
    let frequency = terms.interval_count.to_string();
    vec![
        (
            "shipping_interval_frequency".to_string(),
            frequency.clone(),
        ),
        (
            "shipping_interval_unit_type".to_string(),
            terms.interval_unit.clone(),
        ),
        ("order_interval_frequency".to_string(), frequency.clone()),
        ("order_interval_unit".to_string(), terms.interval_unit.clone()),
        ("charge_interval_frequency".to_string(), frequency),
        (
            "discount_percentage".to_string(),
            config::SUBSCRIPTION_DISCOUNT_PERCENT.to_string(),
        ),
        ("_rc_widget".to_string(), "1".to_string()),
        (
            "subscription_id".to_string(),
            terms.subscription_id.clone(),
        ),
    ]
}

/// Check that terms carry everything the checkout protocol needs.
/// Logs what is missing rather than erroring; the caller decides policy.
pub fn validate_terms(terms: &SubscriptionTerms) -> bool {
    let mut valid = true;
    if terms.selling_plan_id.is_empty() {
        tracing::warn!("subscription terms missing selling plan id");
        valid = false;
    }
    if terms.interval_count == 0 {
        tracing::warn!("subscription terms missing interval count");
        valid = false;
    }
    if terms.interval_unit.is_empty() {
        tracing::warn!("subscription terms missing interval unit");
        valid = false;
    }
    valid
}

// ---------------------------------------------------------------------------
// SubscriptionService
// ---------------------------------------------------------------------------

/// Client for the subscription management API.
///
/// The API key is a merchant secret and is supplied by the caller, never
/// compiled into the SDK.
pub struct SubscriptionService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl SubscriptionService {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_api_url(config::SUBSCRIPTION_API_URL, api_key, config::DEFAULT_TIMEOUT)
    }

    pub fn with_api_url(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    fn request(&self, method: Method, endpoint: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.api_url, endpoint);
        let mut request = self
            .client
            .request(method, &url)
            .header(config::SUBSCRIPTION_TOKEN_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            // Error bodies look like {"errors": ["..."]}; fall back to the
            // status line when the body is not in that shape.
            let message = response
                .json::<Value>()
                .ok()
                .and_then(|v| {
                    v.get("errors")
                        .and_then(|e| e.get(0))
                        .and_then(|m| m.as_str())
                        .map(String::from)
                })
                .unwrap_or_else(|| format!("subscription API returned {status}"));
            return Err(StorefrontError::Subscription(message));
        }

        Ok(response.json()?)
    }

    // -- Subscription lifecycle --------------------------------------------

    pub fn subscription(&self, subscription_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &format!("/subscriptions/{subscription_id}"),
            None,
        )
    }

    pub fn create_subscription(&self, subscription: Value) -> Result<Value> {
        self.request(Method::POST, "/subscriptions", Some(subscription))
    }

    /// Change delivery and charge frequency in one call.
    pub fn update_frequency(
        &self,
        subscription_id: &str,
        frequency: u32,
        frequency_unit: &str,
    ) -> Result<Value> {
        let body = serde_json::json!({
            "order_interval_frequency": frequency,
            "order_interval_unit": frequency_unit,
            "charge_interval_frequency": frequency,
        });
        self.request(
            Method::PUT,
            &format!("/subscriptions/{subscription_id}"),
            Some(body),
        )
    }

    pub fn pause(&self, subscription_id: &str) -> Result<Value> {
        self.request(
            Method::POST,
            &format!("/subscriptions/{subscription_id}/pause"),
            None,
        )
    }

    pub fn resume(&self, subscription_id: &str) -> Result<Value> {
        self.request(
            Method::POST,
            &format!("/subscriptions/{subscription_id}/activate"),
            None,
        )
    }

    pub fn cancel(&self, subscription_id: &str, reason: Option<&str>) -> Result<Value> {
        let body = serde_json::json!({
            "cancellation_reason": reason.unwrap_or("Customer requested cancellation"),
        });
        self.request(
            Method::POST,
            &format!("/subscriptions/{subscription_id}/cancel"),
            Some(body),
        )
    }

    pub fn customer_subscriptions(&self, customer_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &format!("/subscriptions?customer_id={customer_id}"),
            None,
        )
    }

    // -- Charges -----------------------------------------------------------

    pub fn skip_charge(&self, charge_id: &str) -> Result<Value> {
        self.request(Method::POST, &format!("/charges/{charge_id}/skip"), None)
    }

    pub fn upcoming_charges(&self, customer_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &format!("/charges?customer_id={customer_id}&status=queued"),
            None,
        )
    }
}
