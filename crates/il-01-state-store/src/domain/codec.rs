//! Record codec.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{LedgerError, LedgerResult};

/// Encode a record for storage. Failure is a data-model bug, not a caller error.
pub fn encode_record<T: Serialize>(value: &T) -> LedgerResult<Vec<u8>> {
    bincode::serialize(value).map_err(|e| LedgerError::MarshalError(e.to_string()))
}

/// Decode a stored record.
pub fn decode_record<T: DeserializeOwned>(bytes: &[u8]) -> LedgerResult<T> {
    bincode::deserialize(bytes).map_err(|e| LedgerError::MarshalError(e.to_string()))
}
