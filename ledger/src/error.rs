use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("reserve over-consumption: requested {requested} cents, remaining {remaining} cents")]
    OverConsumption { requested: u64, remaining: u64 },

    #[error("storage error: {0}")]
    Storage(#[from] vusd_store::StoreError),
}
