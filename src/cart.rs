//! The cart store: single source of truth for cart contents.
//!
//! All mutations are synchronous, infallible, and persist the updated
//! snapshot before returning, so a read anywhere in the same execution
//! context observes the write. Observers are notified after every mutation;
//! adds additionally carry a display notification.

use crate::config;
use crate::models::{CartTotals, LineItem, Product, SubscriptionTerms, Variant};
use crate::storage::KeyValueStore;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Transient toast payload emitted when an item is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub product_name: String,
    pub product_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Cart contents or discount code changed.
    Changed,
    /// An add completed; carries the toast message and product display data.
    ItemAdded(Notification),
}

pub type CartListener = Box<dyn Fn(&CartEvent) + Send>;

// ---------------------------------------------------------------------------
// CartStore
// ---------------------------------------------------------------------------

/// Owns the authoritative line-item list and the active discount code.
///
/// Hydrates from the injected store on construction; a snapshot that fails
/// to parse is discarded and the cart starts empty.
pub struct CartStore {
    items: Vec<LineItem>,
    discount_code: Option<String>,
    storage: Box<dyn KeyValueStore>,
    listeners: Vec<CartListener>,
}

impl CartStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            items: Vec::new(),
            discount_code: None,
            storage,
            listeners: Vec::new(),
        };
        store.hydrate();
        store
    }

    fn hydrate(&mut self) {
        if let Some(snapshot) = self.storage.get(config::CART_KEY) {
            match serde_json::from_str::<Vec<LineItem>>(&snapshot) {
                Ok(items) => self.items = items,
                Err(e) => {
                    tracing::warn!(error = %e, "corrupt cart snapshot, starting empty");
                    self.storage.remove(config::CART_KEY);
                }
            }
        }
        self.discount_code = self.storage.get(config::DISCOUNT_KEY);
    }

    // -- Reads -------------------------------------------------------------

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items (not total units).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn discount_code(&self) -> Option<&str> {
        self.discount_code.as_deref()
    }

    /// Derived totals, recomputed from scratch on every call.
    pub fn totals(&self) -> CartTotals {
        let item_count = self.items.iter().map(|i| i.quantity).sum();
        let total = self.items.iter().map(|i| i.line_total()).sum();
        CartTotals { item_count, total }
    }

    // -- Mutations ---------------------------------------------------------

    /// Add a variant to the cart.
    ///
    /// A non-positive `quantity` is coerced to 1. Requests beyond the
    /// variant's available stock are silently clamped, and an add that
    /// matches an existing entry (same product, variant, and subscription
    /// interval) increments that entry instead of appending a duplicate.
    pub fn add_item(
        &mut self,
        product: &Product,
        variant: &Variant,
        quantity: i64,
        subscription: Option<SubscriptionTerms>,
    ) {
        let requested = quantity.clamp(1, i64::from(u32::MAX)) as u32;
        let max_quantity = if variant.quantity > 0 {
            variant.quantity
        } else {
            config::MAX_QUANTITY_FALLBACK
        };
        let safe_quantity = requested.min(max_quantity);

        let existing = self
            .items
            .iter()
            .position(|item| item.matches(&product.id, &variant.id, subscription.as_ref()));

        let notification = match existing {
            Some(index) => {
                // Never decrease an existing quantity as a side effect of adding.
                let item = &mut self.items[index];
                item.quantity = (item.quantity + safe_quantity).min(max_quantity);

                let message = if safe_quantity == 1 {
                    format!("Added another {} to your cart", product.name)
                } else {
                    format!("Added {} {} to your cart", safe_quantity, product.name)
                };
                Notification {
                    message,
                    product_name: product.name.clone(),
                    product_image: product.image.clone(),
                }
            }
            None => {
                let purchase_type = match &subscription {
                    Some(terms) if terms.is_recurring => "Subscribe & Save",
                    _ => "One-time purchase",
                };
                let message = format!(
                    "{} ({}) added to your cart!",
                    product.name, purchase_type
                );

                self.items.push(LineItem {
                    product_id: product.id.clone(),
                    variant_id: variant.id.clone(),
                    name: product.name.clone(),
                    image: product.image.clone(),
                    variant_title: variant.title.clone(),
                    unit_price: variant.price,
                    quantity: safe_quantity,
                    max_quantity,
                    subscription,
                });
                Notification {
                    message,
                    product_name: product.name.clone(),
                    product_image: product.image.clone(),
                }
            }
        };

        self.persist_items();
        self.emit(&CartEvent::Changed);
        self.emit(&CartEvent::ItemAdded(notification));
    }

    /// Step a line item down by one, removing it when its quantity hits zero.
    /// No-op when nothing matches.
    pub fn remove_item(
        &mut self,
        product_id: &str,
        variant_id: &str,
        subscription: Option<&SubscriptionTerms>,
    ) {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.matches(product_id, variant_id, subscription))
        else {
            return;
        };

        if self.items[index].quantity > 1 {
            self.items[index].quantity -= 1;
        } else {
            self.items.remove(index);
        }

        self.persist_items();
        self.emit(&CartEvent::Changed);
    }

    /// Replace a line item's quantity, clamped to its stock cap.
    ///
    /// A `new_quantity` below 1 is a no-op; removal is `remove_item`'s job.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        variant_id: &str,
        new_quantity: i64,
        subscription: Option<&SubscriptionTerms>,
    ) {
        if new_quantity < 1 {
            return;
        }

        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.matches(product_id, variant_id, subscription))
        else {
            return;
        };

        let max_quantity = if item.max_quantity > 0 {
            item.max_quantity
        } else {
            config::MAX_QUANTITY_FALLBACK
        };
        item.quantity = (new_quantity.min(i64::from(u32::MAX)) as u32).min(max_quantity);

        self.persist_items();
        self.emit(&CartEvent::Changed);
    }

    /// Empty the cart. The pending discount code is left untouched.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist_items();
        self.emit(&CartEvent::Changed);
    }

    /// Empty the cart AND drop the discount code, removing both persisted
    /// keys. Used on a confirmed return from a completed checkout.
    pub fn clear_all(&mut self) {
        self.items.clear();
        self.discount_code = None;
        self.storage.remove(config::CART_KEY);
        self.storage.remove(config::DISCOUNT_KEY);
        self.emit(&CartEvent::Changed);
    }

    /// Set the promotional discount code, persisted independently of items.
    pub fn set_discount_code(&mut self, code: &str) {
        self.discount_code = Some(code.to_string());
        self.storage.set(config::DISCOUNT_KEY, code);
        self.emit(&CartEvent::Changed);
    }

    // -- Observers ---------------------------------------------------------

    /// Register a listener invoked after every mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&CartEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&self, event: &CartEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    fn persist_items(&self) {
        match serde_json::to_string(&self.items) {
            Ok(json) => self.storage.set(config::CART_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "failed to serialize cart snapshot"),
        }
    }
}
