//! Lifecycle status enums for every record kind.
//!
//! Only states the orchestrator can actually reach are declared. The original
//! platform also declared `pending_hash`/`minting` mint states and
//! `partially_used`/`fully_consumed` lock states that no transition ever
//! produced; those are intentionally absent here.

use serde::{Deserialize, Serialize};

/// Status of a USD injection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionStatus {
    Pending,
    Tokenized,
    Locked,
    Consumed,
    Minted,
    Cancelled,
}

/// Status of a pending lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Status of a lock reserve, derived from its consumption counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReserveStatus {
    Reserved,
    PartiallyConsumed,
    FullyConsumed,
}

/// Status of a mint-with-code request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MintStatus {
    ReadyToMint,
    Completed,
    Cancelled,
}

/// Kind of mint-explorer publication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationType {
    #[serde(rename = "USD_INJECTION")]
    UsdInjection,
    #[serde(rename = "LOCK_CREATED")]
    LockCreated,
    #[serde(rename = "LOCK_ACCEPTED")]
    LockAccepted,
    #[serde(rename = "LOCK_RESERVE")]
    LockReserve,
    #[serde(rename = "VUSD_MINTED")]
    VusdMinted,
}

/// Status of a mint-explorer publication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Published,
    Verified,
}
