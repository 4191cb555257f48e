//! Checkout handoff: translate cart state into the external checkout
//! system's form-submission protocol.
//!
//! The protocol is two sequential form POSTs to the checkout domain: one to
//! clear its session cart, one to add every line item and redirect into
//! checkout. There is no response to parse; the second submission is a hard
//! handoff. The local cart is never touched by this module.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config;
use crate::error::Result;
use crate::models::LineItem;
use crate::subscriptions::checkout_properties;

// ---------------------------------------------------------------------------
// FormSubmitter — The navigation boundary
// ---------------------------------------------------------------------------

/// Submission primitive behind which the actual navigation sits.
///
/// Everything above this trait is pure field construction and is covered by
/// tests; implementations of the trait itself are fire-and-forget.
pub trait FormSubmitter: Send {
    fn submit(&self, path: &str, fields: &[(String, String)]) -> Result<()>;
}

/// Submits forms to the checkout domain as URL-encoded POSTs.
pub struct HttpFormSubmitter {
    client: Client,
    base_url: String,
}

impl HttpFormSubmitter {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl FormSubmitter for HttpFormSubmitter {
    fn submit(&self, path: &str, fields: &[(String, String)]) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .post(&url)
            .form(&fields)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Field construction
// ---------------------------------------------------------------------------

/// Build the ordered field list for the add-items submission.
///
/// Per line item `i`: `items[i][id]` (catalog-namespace prefix stripped) and
/// `items[i][quantity]`, plus selling plan and subscription properties for
/// subscribed items. Items whose processed variant id is not numeric cannot
/// be expressed in the protocol and are skipped; skipping leaves a gap in
/// the index sequence, which the checkout endpoint tolerates.
pub fn checkout_fields(
    items: &[LineItem],
    discount_code: Option<&str>,
) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let variant_id = strip_variant_prefix(&item.variant_id);
        if variant_id.is_empty() || !variant_id.chars().all(|c| c.is_ascii_digit()) {
            tracing::warn!(
                variant_id = %item.variant_id,
                name = %item.name,
                "non-numeric variant id, skipping line item"
            );
            continue;
        }

        fields.push((format!("items[{index}][id]"), variant_id));
        fields.push((
            format!("items[{index}][quantity]"),
            item.quantity.to_string(),
        ));

        if let Some(terms) = &item.subscription {
            let discounted = item.effective_price().round_dp(2);
            let discount_amount = (item.unit_price - discounted).round_dp(2);

            fields.push((
                format!("items[{index}][properties][subscription_price]"),
                discounted.to_string(),
            ));
            fields.push((
                format!("items[{index}][properties][discount_amount]"),
                discount_amount.to_string(),
            ));
            fields.push((
                format!("items[{index}][properties][discount_type]"),
                "percentage".to_string(),
            ));

            if !terms.selling_plan_id.is_empty() {
                fields.push((
                    format!("items[{index}][selling_plan]"),
                    terms.selling_plan_id.clone(),
                ));
            } else {
                tracing::warn!(
                    name = %item.name,
                    "no selling plan on subscription item, sending properties only"
                );
            }

            for (key, value) in checkout_properties(terms) {
                fields.push((format!("items[{index}][properties][{key}]"), value));
            }
        }
    }

    fields.push((
        "return_to".to_string(),
        config::CHECKOUT_RETURN_TO.to_string(),
    ));

    if items.iter().any(|i| i.subscription.is_some()) {
        fields.push((
            "checkout_type".to_string(),
            config::SUBSCRIPTION_CHECKOUT_TYPE.to_string(),
        ));
    }

    if let Some(code) = discount_code {
        if !code.is_empty() {
            fields.push(("discount".to_string(), code.to_string()));
        }
    }

    fields
}

/// Strip the catalog namespace from a variant identifier:
/// `gid://shopify/ProductVariant/123` becomes `123`.
fn strip_variant_prefix(variant_id: &str) -> String {
    variant_id
        .strip_prefix("gid://shopify/ProductVariant/")
        .unwrap_or(variant_id)
        .to_string()
}

// ---------------------------------------------------------------------------
// CheckoutBridge
// ---------------------------------------------------------------------------

/// Drives the two-step clear/add handoff to the external checkout.
pub struct CheckoutBridge {
    submitter: Box<dyn FormSubmitter>,
    clear_delay: Duration,
    alert: Box<dyn Fn(&str) + Send>,
}

impl CheckoutBridge {
    /// Bridge pointed at a checkout domain over HTTP.
    pub fn new(checkout_domain: &str, timeout: Duration) -> Result<Self> {
        let submitter = HttpFormSubmitter::new(checkout_domain, timeout)?;
        Ok(Self::with_submitter(Box::new(submitter)))
    }

    /// Bridge over a caller-supplied submission primitive.
    pub fn with_submitter(submitter: Box<dyn FormSubmitter>) -> Self {
        Self {
            submitter,
            clear_delay: config::CLEAR_CART_DELAY,
            alert: Box::new(|message| tracing::error!(message, "checkout alert")),
        }
    }

    /// Override the pause between the clear and add submissions.
    pub fn clear_delay(mut self, delay: Duration) -> Self {
        self.clear_delay = delay;
        self
    }

    /// Replace the user-facing failure hook (defaults to an error log).
    pub fn on_alert(&mut self, alert: impl Fn(&str) + Send + 'static) {
        self.alert = Box::new(alert);
    }

    /// Hand the cart off to the external checkout.
    ///
    /// Failures are caught here and surfaced through the alert hook; the
    /// local cart is untouched either way, so the user can simply retry.
    pub fn begin_checkout(&self, items: &[LineItem], discount_code: Option<&str>) {
        if let Err(e) = self.try_begin_checkout(items, discount_code) {
            tracing::error!(error = %e, "checkout handoff failed");
            (self.alert)("There was an error processing your checkout. Please try again.");
        }
    }

    /// The fallible handoff: clear the remote cart, wait out the fixed
    /// delay (the clear is never awaited), then submit the add form.
    ///
    /// If interrupted between the two steps the remote cart is left empty
    /// and local state is unaffected; retrying re-clears an already-empty
    /// cart, which is harmless.
    pub fn try_begin_checkout(
        &self,
        items: &[LineItem],
        discount_code: Option<&str>,
    ) -> Result<()> {
        self.submitter.submit(config::CHECKOUT_CLEAR_PATH, &[])?;
        thread::sleep(self.clear_delay);

        let fields = checkout_fields(items, discount_code);
        tracing::debug!(field_count = fields.len(), "submitting add-items form");
        self.submitter.submit(config::CHECKOUT_ADD_PATH, &fields)
    }
}
