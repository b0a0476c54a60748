//! Per-transaction and per-query views over the versioned store.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{Height, LedgerResult};

use crate::domain::codec::{decode_record, encode_record};
use crate::domain::keys::StateKey;
use crate::ports::{BatchOperation, VersionedKvStore, VersionedRead};

/// Write overlay for a single transaction.
///
/// Reads fall through the overlay to the store's latest state. Nothing reaches
/// the store until the owner hands [`TxContext::into_batch`] back to it, so a
/// handler that returns an error leaves no trace.
pub struct TxContext<'a> {
    store: &'a dyn VersionedKvStore,
    prefix: &'a str,
    caller: &'a str,
    height: Height,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> TxContext<'a> {
    pub fn new(
        store: &'a dyn VersionedKvStore,
        prefix: &'a str,
        caller: &'a str,
        height: Height,
    ) -> Self {
        Self {
            store,
            prefix,
            caller,
            height,
            writes: BTreeMap::new(),
        }
    }

    /// Node id that submitted the transaction.
    pub fn caller(&self) -> &'a str {
        self.caller
    }

    /// Height of the block this transaction will commit in.
    pub fn current_height(&self) -> Height {
        self.height
    }

    pub fn get_raw(&self, key: &StateKey) -> LedgerResult<Option<Vec<u8>>> {
        let raw_key = key.to_bytes(self.prefix);
        if let Some(staged) = self.writes.get(&raw_key) {
            return Ok(staged.clone());
        }
        Ok(self.store.get(&raw_key)?)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &StateKey) -> LedgerResult<Option<T>> {
        self.get_raw(key)?
            .map(|bytes| decode_record(&bytes))
            .transpose()
    }

    pub fn exists(&self, key: &StateKey) -> LedgerResult<bool> {
        Ok(self.get_raw(key)?.is_some())
    }

    pub fn put<T: Serialize>(&mut self, key: &StateKey, value: &T) -> LedgerResult<()> {
        let bytes = encode_record(value)?;
        self.writes.insert(key.to_bytes(self.prefix), Some(bytes));
        Ok(())
    }

    pub fn delete(&mut self, key: &StateKey) {
        self.writes.insert(key.to_bytes(self.prefix), None);
    }

    /// Number of keys touched so far.
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Staged writes, in key order.
    pub fn into_batch(self) -> Vec<BatchOperation> {
        self.writes
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => BatchOperation::Put { key, value },
                None => BatchOperation::Delete { key },
            })
            .collect()
    }
}

/// Read-only view pinned to a committed height.
pub struct QueryContext<'a> {
    store: &'a dyn VersionedKvStore,
    prefix: &'a str,
    height: Height,
}

impl<'a> QueryContext<'a> {
    pub fn new(store: &'a dyn VersionedKvStore, prefix: &'a str, height: Height) -> Self {
        Self {
            store,
            prefix,
            height,
        }
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn read(&self, key: &StateKey) -> LedgerResult<VersionedRead> {
        Ok(self
            .store
            .get_at_height(&key.to_bytes(self.prefix), self.height)?)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &StateKey) -> LedgerResult<Option<T>> {
        self.read(key)?
            .into_option()
            .map(|bytes| decode_record(&bytes))
            .transpose()
    }

    pub fn exists(&self, key: &StateKey) -> LedgerResult<bool> {
        Ok(matches!(self.read(key)?, VersionedRead::Present(_)))
    }
}
