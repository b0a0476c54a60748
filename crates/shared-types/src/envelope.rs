//! # Boundary Envelopes
//!
//! What the consensus engine gets back from `apply` and `query`.

use serde::{Deserialize, Serialize};

use crate::entities::Height;
use crate::errors::{LedgerError, CODE_OK};

/// Outcome of a delivered transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    /// `0` on success, otherwise [`LedgerError::code`].
    pub code: u32,
    pub log: String,
    /// Primary id for creation methods (e.g. the request id), empty otherwise.
    pub data: Vec<u8>,
}

impl TxResponse {
    pub fn ok(data: Vec<u8>) -> Self {
        Self {
            code: CODE_OK,
            log: "success".to_string(),
            data,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

impl From<&LedgerError> for TxResponse {
    fn from(err: &LedgerError) -> Self {
        Self {
            code: err.code(),
            log: err.to_string(),
            data: Vec::new(),
        }
    }
}

/// Status string attached to every successful query evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryStatus {
    Success,
    NotFound,
    ServiceIsNotActive,
    NodeIsNotActive,
}

impl QueryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Success => "success",
            QueryStatus::NotFound => "not found",
            QueryStatus::ServiceIsNotActive => "service is not active",
            QueryStatus::NodeIsNotActive => "node is not active",
        }
    }
}

/// Outcome of a query.
///
/// `log` is a [`QueryStatus`] string, or a literal error message when the
/// query itself could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub value: Vec<u8>,
    pub log: String,
    pub height: Height,
}

impl QueryResponse {
    pub fn new(value: Vec<u8>, status: QueryStatus, height: Height) -> Self {
        Self {
            value,
            log: status.as_str().to_string(),
            height,
        }
    }

    pub fn error(message: impl Into<String>, height: Height) -> Self {
        Self {
            value: Vec::new(),
            log: message.into(),
            height,
        }
    }
}
