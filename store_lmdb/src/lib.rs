//! LMDB storage backend for the treasury pipeline.
//!
//! Implements the `ObjectStore` contract from `vusd-store` using the `heed`
//! LMDB bindings: one string→string database holding every collection
//! document plus the schema-version stamp.

pub mod error;
pub mod store;

pub use error::LmdbError;
pub use store::LmdbStore;
