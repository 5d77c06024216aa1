//! Fundamental types for the VUSD treasury minting pipeline.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: identifiers, amounts, timestamps, digests, signature records,
//! and lifecycle status enums.

pub mod amount;
pub mod digest;
pub mod ids;
pub mod signature;
pub mod status;
pub mod time;

pub use amount::UsdAmount;
pub use digest::HexDigest;
pub use ids::{AuthorizationCode, InjectionId, LockId, PublicationCode, RecordId, ReserveId};
pub use signature::SignatureRecord;
pub use status::{
    InjectionStatus, LockStatus, MintStatus, PublicationStatus, PublicationType, ReserveStatus,
};
pub use time::Timestamp;
