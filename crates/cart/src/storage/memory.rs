//! In-process store, for tests and sessions that should not outlive the process.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{KeyValueStore, StorageError};

/// Key-value store held entirely in memory.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_clones_share_values() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
    }
}
