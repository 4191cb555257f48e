//! Cart store tests: clamping, identity merge, zero-handling, derived
//! totals, persistence, and change notifications.

mod common;

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use storefront_sdk::models::LineItem;
use storefront_sdk::{CartEvent, CartStore, KeyValueStore};

// ---------------------------------------------------------------------------
// Quantity clamping
// ---------------------------------------------------------------------------

#[test]
fn add_clamps_to_available_stock() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 1499, 5);

    cart.add_item(&product, &variant, 50, None);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 5);
    assert_eq!(cart.items()[0].max_quantity, 5);
}

#[test]
fn add_coerces_non_positive_quantity_to_one() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 1499, 10);

    cart.add_item(&product, &variant, 0, None);
    assert_eq!(cart.items()[0].quantity, 1);

    cart.add_item(&product, &variant, -7, None);
    assert_eq!(cart.items()[0].quantity, 2);
}

#[test]
fn add_uses_sentinel_when_stock_unknown() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 1499, 0);

    cart.add_item(&product, &variant, 1200, None);

    assert_eq!(cart.items()[0].max_quantity, 999);
    assert_eq!(cart.items()[0].quantity, 999);
}

#[test]
fn update_quantity_clamps_to_max() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 1499, 8);

    cart.add_item(&product, &variant, 1, None);
    cart.update_quantity("p1", "v1", 100, None);

    assert_eq!(cart.items()[0].quantity, 8);
}

// ---------------------------------------------------------------------------
// Identity merge
// ---------------------------------------------------------------------------

#[test]
fn adding_same_variant_twice_merges_quantities() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 1499, 100);

    cart.add_item(&product, &variant, 2, None);
    cart.add_item(&product, &variant, 3, None);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 5);
}

#[test]
fn merge_never_decreases_existing_quantity() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 1499, 10);

    cart.add_item(&product, &variant, 10, None);
    cart.add_item(&product, &variant, 1, None);

    assert_eq!(cart.items()[0].quantity, 10);
}

#[test]
fn one_time_and_subscription_are_distinct_entries() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 2000, 100);

    cart.add_item(&product, &variant, 1, None);
    cart.add_item(&product, &variant, 1, Some(common::monthly_terms()));

    assert_eq!(cart.items().len(), 2);
}

#[test]
fn different_intervals_are_distinct_entries() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 2000, 100);

    let mut bimonthly = common::monthly_terms();
    bimonthly.interval_count = 2;

    cart.add_item(&product, &variant, 1, Some(common::monthly_terms()));
    cart.add_item(&product, &variant, 1, Some(bimonthly));

    assert_eq!(cart.items().len(), 2);
}

// ---------------------------------------------------------------------------
// Remove vs update-to-zero
// ---------------------------------------------------------------------------

#[test]
fn remove_decrements_then_removes() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 1499, 100);

    cart.add_item(&product, &variant, 2, None);

    cart.remove_item("p1", "v1", None);
    assert_eq!(cart.items()[0].quantity, 1);

    cart.remove_item("p1", "v1", None);
    assert!(cart.is_empty());

    // Further identical calls are no-ops.
    cart.remove_item("p1", "v1", None);
    assert!(cart.is_empty());
}

#[test]
fn update_to_zero_is_a_noop_unlike_remove() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 1499, 100);

    cart.add_item(&product, &variant, 1, None);
    cart.update_quantity("p1", "v1", 0, None);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 1);
}

#[test]
fn remove_requires_matching_subscription_identity() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 2000, 100);
    let terms = common::monthly_terms();

    cart.add_item(&product, &variant, 1, Some(terms.clone()));

    // One-time removal must not touch the subscription entry.
    cart.remove_item("p1", "v1", None);
    assert_eq!(cart.items().len(), 1);

    cart.remove_item("p1", "v1", Some(&terms));
    assert!(cart.is_empty());
}

// ---------------------------------------------------------------------------
// Derived totals
// ---------------------------------------------------------------------------

#[test]
fn totals_mix_subscription_and_one_time_pricing() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");

    // Subscription: 20.00 at 15% off -> 17.00 each.
    cart.add_item(
        &product,
        &common::variant("v1", 2000, 100),
        1,
        Some(common::monthly_terms()),
    );
    // One-time: 14.99 each, quantity 2.
    cart.add_item(&product, &common::variant("v2", 1499, 100), 2, None);

    let totals = cart.totals();
    assert_eq!(totals.item_count, 3);
    assert_eq!(totals.total, Decimal::new(4698, 2)); // 17.00 + 2 × 14.99
}

#[test]
fn subscription_total_applies_discount_percent() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 2000, 100);

    cart.add_item(&product, &variant, 1, Some(common::monthly_terms()));

    assert_eq!(cart.totals().total, Decimal::from(17));
}

#[test]
fn totals_of_empty_cart_are_zero() {
    let cart = common::empty_cart();
    let totals = cart.totals();

    assert_eq!(totals.item_count, 0);
    assert_eq!(totals.total, Decimal::ZERO);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn snapshot_serialization_is_idempotent() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");

    cart.add_item(
        &product,
        &common::variant("v1", 2000, 100),
        1,
        Some(common::monthly_terms()),
    );
    cart.add_item(&product, &common::variant("v2", 1499, 100), 2, None);

    let first = serde_json::to_string(cart.items()).unwrap();
    let parsed: Vec<LineItem> = serde_json::from_str(&first).unwrap();
    let second = serde_json::to_string(&parsed).unwrap();

    assert_eq!(first, second);
}

#[test]
fn mutations_persist_and_rehydrate() {
    let store = common::SharedStore::new();
    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 1499, 100);

    let mut cart = CartStore::new(Box::new(store.clone()));
    cart.add_item(&product, &variant, 3, None);
    cart.set_discount_code("BUY3SAVE5");

    // A second store instance over the same backing data sees the snapshot.
    let rehydrated = CartStore::new(Box::new(store));
    assert_eq!(rehydrated.items().len(), 1);
    assert_eq!(rehydrated.items()[0].quantity, 3);
    assert_eq!(rehydrated.discount_code(), Some("BUY3SAVE5"));
}

#[test]
fn corrupt_snapshot_starts_empty() {
    let store = common::SharedStore::new();
    store.set("cart", "{not json");

    let cart = CartStore::new(Box::new(store.clone()));
    assert!(cart.is_empty());

    // The corrupt snapshot is discarded rather than left to fail again.
    assert!(store.get("cart").is_none());
}

#[test]
fn clear_keeps_discount_code() {
    let mut cart = common::empty_cart();
    let product = common::product("p1", "Monstera Plant Food");

    cart.add_item(&product, &common::variant("v1", 1499, 100), 1, None);
    cart.set_discount_code("BUY3SAVE5");
    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.discount_code(), Some("BUY3SAVE5"));
}

#[test]
fn clear_all_drops_items_and_discount() {
    let store = common::SharedStore::new();
    let mut cart = CartStore::new(Box::new(store.clone()));
    let product = common::product("p1", "Monstera Plant Food");

    cart.add_item(&product, &common::variant("v1", 1499, 100), 1, None);
    cart.set_discount_code("BUY3SAVE5");
    cart.clear_all();

    assert!(cart.is_empty());
    assert_eq!(cart.discount_code(), None);
    assert!(store.get("cart").is_none());
    assert!(store.get("bundleDiscount").is_none());
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[test]
fn add_emits_change_and_notification() {
    let mut cart = common::empty_cart();
    let events: Arc<Mutex<Vec<CartEvent>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = events.clone();
    cart.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let product = common::product("p1", "Monstera Plant Food");
    cart.add_item(&product, &common::variant("v1", 1499, 100), 1, None);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], CartEvent::Changed);
    match &events[1] {
        CartEvent::ItemAdded(n) => {
            assert_eq!(
                n.message,
                "Monstera Plant Food (One-time purchase) added to your cart!"
            );
            assert_eq!(n.product_name, "Monstera Plant Food");
        }
        other => panic!("expected ItemAdded, got {other:?}"),
    }
}

#[test]
fn repeat_add_notification_wording_differs() {
    let mut cart = common::empty_cart();
    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = messages.clone();
    cart.subscribe(move |event| {
        if let CartEvent::ItemAdded(n) = event {
            sink.lock().unwrap().push(n.message.clone());
        }
    });

    let product = common::product("p1", "Monstera Plant Food");
    let variant = common::variant("v1", 1499, 100);
    cart.add_item(&product, &variant, 1, None);
    cart.add_item(&product, &variant, 1, None);
    cart.add_item(&product, &variant, 4, None);

    let messages = messages.lock().unwrap();
    assert_eq!(messages[1], "Added another Monstera Plant Food to your cart");
    assert_eq!(messages[2], "Added 4 Monstera Plant Food to your cart");
}

#[test]
fn subscription_add_notification_names_the_plan() {
    let mut cart = common::empty_cart();
    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = messages.clone();
    cart.subscribe(move |event| {
        if let CartEvent::ItemAdded(n) = event {
            sink.lock().unwrap().push(n.message.clone());
        }
    });

    let product = common::product("p1", "Monstera Plant Food");
    cart.add_item(
        &product,
        &common::variant("v1", 2000, 100),
        1,
        Some(common::monthly_terms()),
    );

    assert_eq!(
        messages.lock().unwrap()[0],
        "Monstera Plant Food (Subscribe & Save) added to your cart!"
    );
}
