//! Local key-value storage for the cart snapshot.
//!
//! Mirrors the browser's local storage contract: string keys, string
//! values, read once on start-up and overwritten on every change. The cart
//! snapshot itself is a JSON array of [`Product`] under a single key.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::collections::HashSet;

use rocketshoes_core::Product;
use thiserror::Error;

/// Errors that can occur when reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// String key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Load a value by key, returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Save a value under the given key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value by key.
    ///
    /// # Errors
    ///
    /// Returns error if the change cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load the cart snapshot stored under `key`.
///
/// A missing key is an empty cart. A snapshot that no longer parses is
/// logged and treated as an empty cart, so a bad write never locks the
/// shopper out of their cart. Entries with a zero amount or a repeated
/// product id are dropped (the first entry for an id wins).
///
/// # Errors
///
/// Returns error only if the store itself cannot be read.
pub fn load_cart(store: &dyn KeyValueStore, key: &str) -> Result<Vec<Product>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<Product>>(&raw) {
        Ok(cart) => Ok(retain_valid(key, cart)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable cart snapshot");
            Ok(Vec::new())
        }
    }
}

/// Keep the entries that form a valid cart: unique ids, amounts of at least 1.
fn retain_valid(key: &str, cart: Vec<Product>) -> Vec<Product> {
    let total = cart.len();
    let mut seen = HashSet::new();
    let valid: Vec<Product> = cart
        .into_iter()
        .filter(|item| item.amount > 0 && seen.insert(item.id))
        .collect();

    if valid.len() < total {
        tracing::warn!(
            key,
            dropped = total - valid.len(),
            "Dropped invalid cart snapshot entries"
        );
    }
    valid
}

/// Overwrite the cart snapshot stored under `key`.
///
/// # Errors
///
/// Returns error if the cart cannot be encoded or the store rejects the write.
pub fn save_cart(
    store: &dyn KeyValueStore,
    key: &str,
    cart: &[Product],
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(cart)?;
    store.set(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;

    const KEY: &str = "@RocketShoes:cart";

    fn item(id: i32, amount: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Tênis {id}"),
            price: Decimal::new(13990, 2),
            image: format!("https://cdn.example.com/{id}.jpg"),
            amount,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_load_missing_key_is_empty_cart() {
        let store = MemoryStore::new();
        assert!(load_cart(&store, KEY).unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let cart = vec![item(1, 2), item(3, 1)];
        save_cart(&store, KEY, &cart).unwrap();
        assert_eq!(load_cart(&store, KEY).unwrap(), cart);
    }

    #[test]
    fn test_snapshot_is_json_array() {
        let store = MemoryStore::new();
        save_cart(&store, KEY, &[item(1, 2)]).unwrap();

        let raw = store.get(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["id"], 1);
        assert_eq!(entries[0]["amount"], 2);
    }

    #[test]
    fn test_load_corrupt_snapshot_is_empty_cart() {
        let store = MemoryStore::new();
        store.set(KEY, "{not json").unwrap();
        assert!(load_cart(&store, KEY).unwrap().is_empty());
    }

    #[test]
    fn test_load_drops_zero_amounts_and_duplicate_ids() {
        let store = MemoryStore::new();
        let mut duplicate = item(1, 5);
        duplicate.title = "Duplicate".to_string();
        let raw = serde_json::to_string(&[item(1, 2), item(2, 0), duplicate, item(3, 1)]).unwrap();
        store.set(KEY, &raw).unwrap();

        let cart = load_cart(&store, KEY).unwrap();
        assert_eq!(cart, vec![item(1, 2), item(3, 1)]);
    }

    #[test]
    fn test_load_accepts_numeric_prices() {
        let store = MemoryStore::new();
        store
            .set(
                KEY,
                r#"[{"id":1,"title":"Tênis","price":179.9,"image":"a.jpg","amount":2}]"#,
            )
            .unwrap();
        let cart = load_cart(&store, KEY).unwrap();
        assert_eq!(cart[0].price, Decimal::new(1799, 1));
        assert_eq!(cart[0].amount, 2);
    }
}
