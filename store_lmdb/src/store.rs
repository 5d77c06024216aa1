//! LMDB implementation of `ObjectStore`.
//!
//! Every `put_raw` commits its own write transaction, so a successful return
//! means the document is durable — the property the orchestrator's
//! write-through persistence relies on.

use std::path::Path;

use heed::types::Str;
use heed::{Database, Env, EnvOpenOptions};

use vusd_store::{check_schema, ObjectStore, StoreError};

use crate::LmdbError;

/// 256 MiB is far beyond what the demo-scale collections need.
const MAP_SIZE: usize = 256 * 1024 * 1024;

#[derive(Debug)]
pub struct LmdbStore {
    env: Env,
    db: Database<Str, Str>,
}

impl LmdbStore {
    /// Open or create the store at `path` (a directory).
    ///
    /// Stamps fresh stores with the current schema version and refuses
    /// stores written by a newer schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(path).map_err(LmdbError::from)?;
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(MAP_SIZE)
                .max_dbs(1)
                .open(path)
        }
        .map_err(LmdbError::from)?;

        let mut wtxn = env.write_txn().map_err(LmdbError::from)?;
        let db = env
            .create_database::<Str, Str>(&mut wtxn, Some("treasury"))
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;

        let store = Self { env, db };
        check_schema(&store)?;
        Ok(store)
    }
}

impl ObjectStore for LmdbStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let value = self.db.get(&rtxn, key).map_err(LmdbError::from)?;
        Ok(value.map(str::to_string))
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.db.put(&mut wtxn, key, value).map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.db.delete(&mut wtxn, key).map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vusd_store::{get_json, keys, put_json, SCHEMA_VERSION};

    #[test]
    fn roundtrip_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = LmdbStore::open(dir.path()).unwrap();
            put_json(&store, keys::USD_INJECTIONS, &vec!["a", "b"]).unwrap();
        }
        let store = LmdbStore::open(dir.path()).unwrap();
        let back: Option<Vec<String>> = get_json(&store, keys::USD_INJECTIONS).unwrap();
        assert_eq!(back, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn fresh_store_is_stamped() {
        let dir = tempfile::tempdir().unwrap();
        let store = LmdbStore::open(dir.path()).unwrap();
        let version: Option<u32> = get_json(&store, keys::SCHEMA_VERSION_KEY).unwrap();
        assert_eq!(version, Some(SCHEMA_VERSION));
    }

    #[test]
    fn newer_schema_refused_on_open() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = LmdbStore::open(dir.path()).unwrap();
            put_json(&store, keys::SCHEMA_VERSION_KEY, &(SCHEMA_VERSION + 1)).unwrap();
        }
        let err = LmdbStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Corruption(_)));
    }

    #[test]
    fn delete_then_get_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LmdbStore::open(dir.path()).unwrap();
        store.put_raw("k", "1").unwrap();
        store.delete("k").unwrap();
        assert_eq!(store.get_raw("k").unwrap(), None);
    }
}
