//! Ledger state for the treasury minting pipeline.
//!
//! Record types for every lifecycle step:
//! - **Injection**: a unit of external USD value entering the system
//! - **PendingLock**: a claim on an injection awaiting a second party
//! - **LockReserve**: the accepted portion, tracked for partial consumption
//! - **MintRequest**: an authorized, not-yet-executed conversion to VUSD
//! - **Publication**: an append-only provenance record in the mint explorer
//!
//! plus [`LedgerState`] (the five collections with write-through persistence)
//! and the [`statistics`] rollups.

pub mod error;
pub mod injection;
pub mod lock;
pub mod mint_request;
pub mod notification;
pub mod publication;
pub mod reserve;
pub mod state;
pub mod statistics;

pub use error::LedgerError;
pub use injection::{AccountType, Beneficiary, BlockchainRef, Injection, IsoData, SourceAccount};
pub use lock::{BankInfo, LockIsoData, PendingLock, SourceInfo};
pub use mint_request::{MintRequest, MintResult};
pub use notification::{Notification, NotificationEvent};
pub use publication::{Actors, BankRef, Publication, PublicationChain, PublicationSignatures};
pub use reserve::LockReserve;
pub use state::LedgerState;
pub use statistics::{CombinedStats, DcbStats, MintingStats, TreasuryStatistics};
