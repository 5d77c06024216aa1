//! Abstract storage contract for the VUSD treasury pipeline.
//!
//! Every storage backend (LMDB, in-memory for testing) implements
//! [`ObjectStore`]. The rest of the workspace depends only on the trait:
//! JSON blobs keyed by string, no schema awareness beyond a version tag.

pub mod error;
pub mod keys;
pub mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Durable key-value store of JSON documents.
///
/// `get`/`put` move raw JSON text; the typed helpers [`get_json`] and
/// [`put_json`] layer serde on top. Implementations must make `put_raw`
/// durable before returning — the orchestrator's atomicity guarantee leans
/// on that.
pub trait ObjectStore: Send + Sync {
    /// Fetch the raw JSON document stored under `key`, if any.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` (a JSON document) under `key`, replacing any prior value.
    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Shared handles delegate, so one store can back several components.
impl<S: ObjectStore + ?Sized> ObjectStore for std::sync::Arc<S> {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_raw(key)
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

/// Typed read through an [`ObjectStore`].
pub fn get_json<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get_raw(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Serialization(format!("key '{key}': {e}"))),
        None => Ok(None),
    }
}

/// Typed write through an [`ObjectStore`].
pub fn put_json<T: Serialize>(
    store: &dyn ObjectStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| StoreError::Serialization(format!("key '{key}': {e}")))?;
    store.put_raw(key, &raw)
}

/// Current schema version written to new stores.
pub const SCHEMA_VERSION: u32 = 1;

/// Validate (or initialize) the store's schema version.
///
/// A fresh store gets stamped with [`SCHEMA_VERSION`]. A store written by a
/// newer schema fails with [`StoreError::Corruption`] instead of being read
/// with the wrong shape.
pub fn check_schema(store: &dyn ObjectStore) -> Result<u32, StoreError> {
    match get_json::<u32>(store, keys::SCHEMA_VERSION_KEY)? {
        Some(version) if version > SCHEMA_VERSION => Err(StoreError::Corruption(format!(
            "store schema version {version} is newer than supported {SCHEMA_VERSION}"
        ))),
        Some(version) => Ok(version),
        None => {
            put_json(store, keys::SCHEMA_VERSION_KEY, &SCHEMA_VERSION)?;
            Ok(SCHEMA_VERSION)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_roundtrip() {
        let store = MemoryStore::new();
        put_json(&store, "k", &vec![1u32, 2, 3]).unwrap();
        let back: Option<Vec<u32>> = get_json(&store, "k").unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[test]
    fn missing_key_is_none() {
        let store = MemoryStore::new();
        let got: Option<Vec<u32>> = get_json(&store, "missing").unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let store = MemoryStore::new();
        store.put_raw("k", "{not json").unwrap();
        let err = get_json::<Vec<u32>>(&store, "k").unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn fresh_store_gets_stamped() {
        let store = MemoryStore::new();
        assert_eq!(check_schema(&store).unwrap(), SCHEMA_VERSION);
        // Second check reads the stamp back.
        assert_eq!(check_schema(&store).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let store = MemoryStore::new();
        put_json(&store, keys::SCHEMA_VERSION_KEY, &(SCHEMA_VERSION + 1)).unwrap();
        let err = check_schema(&store).unwrap_err();
        assert!(matches!(err, StoreError::Corruption(_)));
    }
}
