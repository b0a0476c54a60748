//! # Outbound Ports (Driven Ports)
//!
//! The versioned key-value engine this crate needs from the host.

use shared_types::Height;

use crate::domain::{AppHash, StoreError};

/// Versioned key-value engine.
///
/// Production: `RocksDbVersionedStore` (feature `rocksdb`)
/// Testing: `InMemoryVersionedStore`
///
/// Writes land in an uncommitted working set. `get` sees the working set;
/// `get_at_height` never does. `commit` promotes the working set to
/// `latest_height() + 1` in one step.
pub trait VersionedKvStore: Send + Sync {
    /// Latest value, including writes not yet committed.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Value as committed at or before `height`.
    ///
    /// ## Returns
    ///
    /// - `Present(bytes)` if a live value exists at `height`
    /// - `Absent` if the key has history but no live value at `height`
    ///   (created later, or deleted at or before `height`)
    /// - `NeverWritten` if the key has no committed history at all
    fn get_at_height(&self, key: &[u8], height: Height) -> Result<VersionedRead, StoreError>;

    /// Stage a single put in the working set.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Stage a single delete in the working set.
    fn delete(&self, key: &[u8]) -> Result<(), StoreError>;

    /// Stage a batch in the working set. Either every operation is staged
    /// or none is.
    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError>;

    /// Promote the working set to the next height.
    fn commit(&self) -> Result<CommitInfo, StoreError>;

    /// Height of the last commit (0 before the first).
    fn latest_height(&self) -> Height;

    /// App hash of the last commit.
    fn app_hash(&self) -> AppHash;
}

/// Result of a height-pinned read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedRead {
    Present(Vec<u8>),
    Absent,
    NeverWritten,
}

impl VersionedRead {
    pub fn into_option(self) -> Option<Vec<u8>> {
        match self {
            VersionedRead::Present(bytes) => Some(bytes),
            VersionedRead::Absent | VersionedRead::NeverWritten => None,
        }
    }
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// What a commit produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitInfo {
    pub height: Height,
    pub app_hash: AppHash,
}
