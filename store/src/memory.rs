//! In-memory store — deterministic storage for tests and demos.
//!
//! Interior mutability keeps the [`ObjectStore`] methods `&self`, matching
//! the durable backends.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::{ObjectStore, StoreError};

/// A `HashMap`-backed store. Contents do not survive the process; use the
/// LMDB backend for durability.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored keys (for assertions).
    pub fn len(&self) -> usize {
        self.entries.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned())
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get_raw("a").unwrap(), None);
        store.put_raw("a", "[1]").unwrap();
        assert_eq!(store.get_raw("a").unwrap().as_deref(), Some("[1]"));
        store.delete("a").unwrap();
        assert_eq!(store.get_raw("a").unwrap(), None);
    }

    #[test]
    fn put_replaces_prior_value() {
        let store = MemoryStore::new();
        store.put_raw("a", "[1]").unwrap();
        store.put_raw("a", "[2]").unwrap();
        assert_eq!(store.get_raw("a").unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn deleting_absent_key_is_ok() {
        let store = MemoryStore::new();
        store.delete("nope").unwrap();
    }
}
