//! Storage tests: file-backed round trips and memory-store semantics.

use storefront_sdk::{FileStore, KeyValueStore, MemoryStore};

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

#[test]
fn file_store_round_trips_values() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::new(Some(tmp.path().to_path_buf())).unwrap();

    store.set("cart", r#"[{"quantity":1}]"#);
    assert_eq!(store.get("cart").as_deref(), Some(r#"[{"quantity":1}]"#));
}

#[test]
fn file_store_returns_none_for_missing_key() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::new(Some(tmp.path().to_path_buf())).unwrap();

    assert!(store.get("cart").is_none());
}

#[test]
fn file_store_overwrites_on_set() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::new(Some(tmp.path().to_path_buf())).unwrap();

    store.set("bundleDiscount", "BUY3SAVE5");
    store.set("bundleDiscount", "SUBSCRIBE15");

    assert_eq!(store.get("bundleDiscount").as_deref(), Some("SUBSCRIBE15"));
}

#[test]
fn file_store_remove_deletes_the_key() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::new(Some(tmp.path().to_path_buf())).unwrap();

    store.set("cart", "[]");
    store.remove("cart");

    assert!(store.get("cart").is_none());
}

#[test]
fn file_store_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();

    {
        let store = FileStore::new(Some(tmp.path().to_path_buf())).unwrap();
        store.set("cart", "[]");
    }

    let reopened = FileStore::new(Some(tmp.path().to_path_buf())).unwrap();
    assert_eq!(reopened.get("cart").as_deref(), Some("[]"));
}

#[test]
fn file_store_sanitizes_path_like_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::new(Some(tmp.path().to_path_buf())).unwrap();

    store.set("../escape/attempt", "value");

    // Same sanitization on read, and nothing written outside the data dir.
    assert_eq!(store.get("../escape/attempt").as_deref(), Some("value"));
    assert!(!tmp.path().join("..").join("escape").exists());
}

#[test]
fn file_store_creates_missing_data_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let nested = tmp.path().join("a").join("b");

    let store = FileStore::new(Some(nested.clone())).unwrap();
    store.set("cart", "[]");

    assert!(nested.exists());
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[test]
fn memory_store_round_trips_values() {
    let store = MemoryStore::new();

    store.set("cart", "[]");
    assert_eq!(store.get("cart").as_deref(), Some("[]"));

    store.remove("cart");
    assert!(store.get("cart").is_none());
}

#[test]
fn memory_store_starts_empty() {
    let store = MemoryStore::new();
    assert!(store.get("cart").is_none());
    assert!(store.get("bundleDiscount").is_none());
}
