//! Shared test fixtures for the storefront SDK integration tests.
//!
//! Provides product/variant/terms builders, an in-memory cart factory, and a
//! shareable key-value store so tests can observe what the cart persisted.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use storefront_sdk::models::{Product, SubscriptionTerms, Variant};
use storefront_sdk::{CartStore, KeyValueStore, MemoryStore};

/// A product with display metadata only; variants are supplied per test.
pub fn product(id: &str, name: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: "PLANT FOOD".to_string(),
        image: format!("/assets/products/{id}.png"),
        images: Vec::new(),
        price: Decimal::new(1499, 2),
        reviews: 100,
        rating: 4.8,
        best_seller: false,
        variants: Vec::new(),
        handle: id.to_string(),
        vendor: "TPS Plant Foods".to_string(),
        tags: Vec::new(),
        has_available_variants: true,
    }
}

pub fn variant(id: &str, price_cents: i64, quantity: u32) -> Variant {
    Variant {
        id: id.to_string(),
        title: "8 Ounce".to_string(),
        price: Decimal::new(price_cents, 2),
        compare_at_price: None,
        available: quantity > 0,
        quantity,
        sku: String::new(),
        options: Vec::new(),
    }
}

/// Monthly Subscribe & Save terms at 15% off.
pub fn monthly_terms() -> SubscriptionTerms {
    SubscriptionTerms {
        interval_count: 1,
        interval_unit: "month".to_string(),
        is_recurring: true,
        selling_plan_id: "sp_1".to_string(),
        subscription_id: "sub_1".to_string(),
        discount_percent: Decimal::from(15),
    }
}

pub fn empty_cart() -> CartStore {
    CartStore::new(Box::new(MemoryStore::new()))
}

/// Cloneable store backed by a shared map, so a test can hand one clone to a
/// cart and inspect (or rehydrate from) the other.
#[derive(Clone, Default)]
pub struct SharedStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Look up a field value in an ordered form-field list.
pub fn field<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
