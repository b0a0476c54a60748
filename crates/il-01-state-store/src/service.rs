//! # State Store Service
//!
//! Binds a [`VersionedKvStore`] backend to the ledger's key prefix and hands
//! out transaction overlays and height-pinned snapshots.

use std::sync::Arc;

use shared_types::{Height, LedgerResult};
use tracing::{debug, info};

use crate::adapters::InMemoryVersionedStore;
use crate::domain::{AppHash, QueryContext, StoreError, TxContext};
use crate::ports::{CommitInfo, VersionedKvStore};

#[derive(Clone)]
pub struct StateStore {
    backend: Arc<dyn VersionedKvStore>,
    prefix: String,
}

impl StateStore {
    pub fn new(backend: Arc<dyn VersionedKvStore>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// Store over a fresh [`InMemoryVersionedStore`].
    pub fn in_memory(prefix: impl Into<String>) -> Self {
        Self::new(Arc::new(InMemoryVersionedStore::new()), prefix)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Open an overlay for a transaction in the block being built.
    pub fn begin<'a>(&'a self, caller: &'a str) -> TxContext<'a> {
        TxContext::new(
            self.backend.as_ref(),
            &self.prefix,
            caller,
            self.backend.latest_height() + 1,
        )
    }

    /// Stage a successful transaction's writes into the working set.
    pub fn apply(&self, tx: TxContext<'_>) -> LedgerResult<usize> {
        let batch = tx.into_batch();
        let count = batch.len();
        self.backend.atomic_batch_write(batch)?;
        Ok(count)
    }

    pub fn commit(&self) -> LedgerResult<CommitInfo> {
        let info = self.backend.commit()?;
        info!(
            height = info.height,
            app_hash = %hex::encode(info.app_hash),
            "[il-01] block committed"
        );
        Ok(info)
    }

    /// Snapshot at `height`; `0` means the latest committed height.
    pub fn snapshot(&self, height: Height) -> LedgerResult<QueryContext<'_>> {
        let latest = self.backend.latest_height();
        let pinned = if height == 0 { latest } else { height };
        if pinned > latest {
            debug!(requested = height, latest, "[il-01] snapshot above head");
            return Err(StoreError::HeightNotCommitted {
                requested: height,
                latest,
            }
            .into());
        }
        Ok(QueryContext::new(self.backend.as_ref(), &self.prefix, pinned))
    }

    pub fn latest_height(&self) -> Height {
        self.backend.latest_height()
    }

    pub fn app_hash(&self) -> AppHash {
        self.backend.app_hash()
    }
}
