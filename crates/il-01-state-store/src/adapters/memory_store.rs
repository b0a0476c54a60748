use std::collections::BTreeMap;

use parking_lot::{Mutex, RwLock};
use shared_types::Height;

use crate::domain::{chain_app_hash, AppHash, StoreError, GENESIS_APP_HASH};
use crate::ports::{BatchOperation, CommitInfo, VersionedKvStore, VersionedRead};

type WriteSet = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

/// Append-only version log: every key maps to its values by commit height,
/// `None` marking a delete. Committed entries are never rewritten.
#[derive(Default)]
struct VersionLog {
    entries: BTreeMap<Vec<u8>, BTreeMap<Height, Option<Vec<u8>>>>,
    height: Height,
    app_hash: AppHash,
}

/// In-memory implementation of [`VersionedKvStore`].
pub struct InMemoryVersionedStore {
    committed: RwLock<VersionLog>,
    working: Mutex<WriteSet>,
}

impl InMemoryVersionedStore {
    pub fn new() -> Self {
        Self {
            committed: RwLock::new(VersionLog {
                app_hash: GENESIS_APP_HASH,
                ..Default::default()
            }),
            working: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of distinct keys with committed history.
    pub fn key_count(&self) -> usize {
        self.committed.read().entries.len()
    }
}

impl Default for InMemoryVersionedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionedKvStore for InMemoryVersionedStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(staged) = self.working.lock().get(key) {
            return Ok(staged.clone());
        }
        let log = self.committed.read();
        Ok(log
            .entries
            .get(key)
            .and_then(|versions| versions.values().next_back().cloned())
            .flatten())
    }

    fn get_at_height(&self, key: &[u8], height: Height) -> Result<VersionedRead, StoreError> {
        let log = self.committed.read();
        if height > log.height {
            return Err(StoreError::HeightNotCommitted {
                requested: height,
                latest: log.height,
            });
        }
        let Some(versions) = log.entries.get(key) else {
            return Ok(VersionedRead::NeverWritten);
        };
        Ok(match versions.range(..=height).next_back() {
            Some((_, Some(value))) => VersionedRead::Present(value.clone()),
            _ => VersionedRead::Absent,
        })
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.working.lock().insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.working.lock().insert(key.to_vec(), None);
        Ok(())
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        let mut working = self.working.lock();
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    working.insert(key, Some(value));
                }
                BatchOperation::Delete { key } => {
                    working.insert(key, None);
                }
            }
        }
        Ok(())
    }

    fn commit(&self) -> Result<CommitInfo, StoreError> {
        let mut log = self.committed.write();
        let writes = std::mem::take(&mut *self.working.lock());

        let height = log.height + 1;
        let app_hash = chain_app_hash(&log.app_hash, height, &writes);
        for (key, value) in writes {
            log.entries.entry(key).or_default().insert(height, value);
        }
        log.height = height;
        log.app_hash = app_hash;

        Ok(CommitInfo { height, app_hash })
    }

    fn latest_height(&self) -> Height {
        self.committed.read().height
    }

    fn app_hash(&self) -> AppHash {
        self.committed.read().app_hash
    }
}
