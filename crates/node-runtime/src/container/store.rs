//! Store construction per [`StoreConfig`](super::StoreConfig).

use il_01_state_store::StateStore;
use shared_types::LedgerResult;
use tracing::info;

use super::config::{AppConfig, StoreBackend};

/// Open the configured backend under the ledger key prefix.
pub fn open_store(config: &AppConfig) -> LedgerResult<StateStore> {
    let prefix = config.ledger.key_prefix.clone();
    match config.store.backend {
        StoreBackend::Memory => {
            info!(prefix = %prefix, "[runtime] using in-memory store");
            Ok(StateStore::in_memory(prefix))
        }
        StoreBackend::RocksDb => open_rocksdb(config, prefix),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &AppConfig, prefix: String) -> LedgerResult<StateStore> {
    use std::sync::Arc;

    use il_01_state_store::{RocksDbConfig, RocksDbVersionedStore};

    let db = RocksDbVersionedStore::open(RocksDbConfig {
        path: config.store.data_dir.to_string_lossy().into_owned(),
        block_cache_size: config.store.block_cache_size,
        sync_writes: config.store.sync_writes,
    })?;
    info!(path = %config.store.data_dir.display(), "[runtime] opened rocksdb store");
    Ok(StateStore::new(Arc::new(db), prefix))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &AppConfig, _prefix: String) -> LedgerResult<StateStore> {
    Err(shared_types::LedgerError::Storage(
        "rocksdb backend is not compiled in; rebuild with --features rocksdb".to_string(),
    ))
}
