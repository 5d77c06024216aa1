use thiserror::Error;
use vusd_ledger::LedgerError;
use vusd_store::StoreError;

/// Error taxonomy for orchestrator operations.
///
/// `Validation` and `NotFound` are surfaced before any mutation; `Conflict`
/// guards reserve over-consumption at mint time; `Storage` propagates
/// persistence failures so the caller knows the transition may not have
/// durably committed.
#[derive(Debug, Error)]
pub enum TreasuryError {
    #[error("validation error: {reason}")]
    Validation { reason: String },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("conflict: {reason}")]
    Conflict { reason: String },

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<LedgerError> for TreasuryError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::OverConsumption { .. } => Self::Conflict {
                reason: e.to_string(),
            },
            LedgerError::Storage(e) => Self::Storage(e),
        }
    }
}
