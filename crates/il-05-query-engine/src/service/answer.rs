use serde::Serialize;
use shared_types::{LedgerError, LedgerResult, QueryStatus};

/// JSON result of an evaluated query and its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub value: Vec<u8>,
    pub status: QueryStatus,
}

impl Answer {
    fn encode<T: Serialize>(value: &T, status: QueryStatus) -> LedgerResult<Self> {
        let value =
            serde_json::to_vec(value).map_err(|e| LedgerError::MarshalError(e.to_string()))?;
        Ok(Self { value, status })
    }

    pub fn success<T: Serialize>(value: &T) -> LedgerResult<Self> {
        Self::encode(value, QueryStatus::Success)
    }

    /// The primary key is absent; `value` is the zero/empty result.
    pub fn not_found<T: Serialize>(value: &T) -> LedgerResult<Self> {
        Self::encode(value, QueryStatus::NotFound)
    }

    /// `{}` with a "not found" status.
    pub fn not_found_empty() -> Self {
        Self {
            value: b"{}".to_vec(),
            status: QueryStatus::NotFound,
        }
    }

    pub fn service_inactive<T: Serialize>(value: &T) -> LedgerResult<Self> {
        Self::encode(value, QueryStatus::ServiceIsNotActive)
    }

    pub fn node_inactive<T: Serialize>(value: &T) -> LedgerResult<Self> {
        Self::encode(value, QueryStatus::NodeIsNotActive)
    }
}
