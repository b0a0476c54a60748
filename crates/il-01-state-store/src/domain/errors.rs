use shared_types::{Height, LedgerError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Corrupted entry under key {key}: {message}")]
    Corrupted { key: String, message: String },

    #[error("Height {requested} is not committed yet (latest {latest})")]
    HeightNotCommitted { requested: Height, latest: Height },
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        LedgerError::Storage(err.to_string())
    }
}
