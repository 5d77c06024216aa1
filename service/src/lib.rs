//! The treasury lifecycle orchestrator.
//!
//! [`TreasuryService`] drives value through the custody state machine:
//! injected → locked → accepted → reserved → consumed → minted. Each public
//! operation is synchronous, persists its effects in a single write-through
//! pass, and fans out [`TreasuryEvent`]s to subscribers.

pub mod config;
pub mod error;
pub mod events;
pub mod notify;
pub mod service;

pub use config::{BankConfig, ContractAddresses, NetworkConfig, TreasuryConfig};
pub use error::TreasuryError;
pub use events::{EventBus, SubscriptionId, Topic, TreasuryEvent};
pub use notify::Mailbox;
pub use service::{AcceptOutcome, ExecutedMint, InjectParams, IsoParams, TreasuryService};
