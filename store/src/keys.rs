//! Fixed store keys for the treasury collections.
//!
//! One key per collection; each holds the full JSON-encoded collection and is
//! rewritten whole on every mutating operation (write-through, no deltas).

pub const USD_INJECTIONS: &str = "treasury_usd_injections";
pub const PENDING_LOCKS: &str = "treasury_pending_locks";
pub const LOCK_RESERVES: &str = "treasury_lock_reserves";
pub const MINT_QUEUE: &str = "treasury_mint_with_code_queue";
pub const MINT_EXPLORER: &str = "treasury_mint_explorer";
pub const STATISTICS: &str = "treasury_statistics";
pub const NOTIFICATIONS: &str = "treasury_notifications";

/// Reserved meta key; not a collection.
pub const SCHEMA_VERSION_KEY: &str = "treasury_schema_version";
