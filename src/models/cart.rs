use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SubscriptionTerms — Subscribe & Save metadata attached to a line item
// ---------------------------------------------------------------------------

/// Subscription terms chosen for a line item, absent for one-time purchases.
///
/// The interval fields are part of the line item's identity: the same variant
/// on a monthly and a bi-monthly plan are two distinct cart entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionTerms {
    pub interval_count: u32,
    pub interval_unit: String,
    pub is_recurring: bool,
    pub selling_plan_id: String,
    pub subscription_id: String,
    pub discount_percent: Decimal,
}

impl SubscriptionTerms {
    /// Whether two sets of terms describe the same delivery schedule.
    pub fn same_interval(&self, other: &SubscriptionTerms) -> bool {
        self.interval_count == other.interval_count && self.interval_unit == other.interval_unit
    }
}

// ---------------------------------------------------------------------------
// LineItem — One product+variant+terms entry in the cart
// ---------------------------------------------------------------------------

/// A cart entry. Display metadata (`name`, `image`, `variant_title`) and the
/// unit price are copied at add-time and never re-fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub variant_id: String,
    pub name: String,
    pub image: String,
    pub variant_title: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Variant stock at add-time; quantity mutations clamp against this.
    pub max_quantity: u32,
    pub subscription: Option<SubscriptionTerms>,
}

impl LineItem {
    /// Identity check: same product, same variant, and matching subscription
    /// interval (a one-time purchase never matches a subscription entry).
    pub fn matches(
        &self,
        product_id: &str,
        variant_id: &str,
        subscription: Option<&SubscriptionTerms>,
    ) -> bool {
        if self.product_id != product_id || self.variant_id != variant_id {
            return false;
        }
        match (&self.subscription, subscription) {
            (None, None) => true,
            (Some(mine), Some(theirs)) => mine.same_interval(theirs),
            _ => false,
        }
    }

    /// Unit price with the subscription discount applied, when present.
    /// One-time purchases pay the stored unit price unchanged.
    pub fn effective_price(&self) -> Decimal {
        match &self.subscription {
            Some(terms) => {
                self.unit_price * (Decimal::ONE - terms.discount_percent / Decimal::from(100))
            }
            None => self.unit_price,
        }
    }

    /// Line total: quantity × effective unit price.
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.effective_price()
    }
}

// ---------------------------------------------------------------------------
// CartTotals — Derived aggregate, recomputed on every read
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub item_count: u32,
    pub total: Decimal,
}
