//! # RocksDB Versioned Store
//!
//! Persistent implementation of [`VersionedKvStore`].
//!
//! ## Column Families
//!
//! - `versions` - `u32 key length || key || u64 height` → `tag || value`
//!   (tag 1 = put, 0 = delete). Big-endian encoding keeps all versions of a
//!   key contiguous and ordered by height.
//! - `meta` - last committed height and app hash
//!
//! The uncommitted working set stays in memory and is flushed as a single
//! `WriteBatch` on commit.

use std::collections::BTreeMap;

use parking_lot::{Mutex, RwLock};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options, WriteBatch, DB};
use shared_types::Height;
use tracing::info;

use crate::domain::{chain_app_hash, AppHash, StoreError, GENESIS_APP_HASH};
use crate::ports::{BatchOperation, CommitInfo, VersionedKvStore, VersionedRead};

pub const CF_VERSIONS: &str = "versions";
pub const CF_META: &str = "meta";

const META_HEIGHT: &[u8] = b"height";
const META_APP_HASH: &[u8] = b"app_hash";

const TAG_DELETE: u8 = 0;
const TAG_PUT: u8 = 1;

/// RocksDB configuration.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Enable fsync on every commit (default: true)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/ledger".to_string(),
            block_cache_size: 64 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (small cache, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

pub struct RocksDbVersionedStore {
    db: DB,
    config: RocksDbConfig,
    head: RwLock<(Height, AppHash)>,
    working: Mutex<BTreeMap<Vec<u8>, Option<Vec<u8>>>>,
}

fn io_error(context: &str, e: rocksdb::Error) -> StoreError {
    StoreError::Io {
        message: format!("{context}: {e}"),
    }
}

fn key_prefix(key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + key.len() + 8);
    out.extend_from_slice(&(key.len() as u32).to_be_bytes());
    out.extend_from_slice(key);
    out
}

fn versioned_key(key: &[u8], height: Height) -> Vec<u8> {
    let mut out = key_prefix(key);
    out.extend_from_slice(&height.to_be_bytes());
    out
}

fn decode_value(key: &[u8], raw: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
    match raw.split_first() {
        Some((&TAG_PUT, rest)) => Ok(Some(rest.to_vec())),
        Some((&TAG_DELETE, _)) => Ok(None),
        _ => Err(StoreError::Corrupted {
            key: hex::encode(key),
            message: "unknown value tag".to_string(),
        }),
    }
}

impl RocksDbVersionedStore {
    /// Open or create the database and restore the last committed head.
    pub fn open(config: RocksDbConfig) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors = [CF_VERSIONS, CF_META]
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)
            .map_err(|e| io_error("Failed to open RocksDB", e))?;

        let store = Self {
            db,
            config,
            head: RwLock::new((0, GENESIS_APP_HASH)),
            working: Mutex::new(BTreeMap::new()),
        };
        let head = store.load_head()?;
        info!(height = head.0, path = %store.config.path, "[il-01] opened versioned store");
        *store.head.write() = head;
        Ok(store)
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, StoreError> {
        self.db.cf_handle(name).ok_or_else(|| StoreError::Io {
            message: format!("missing column family {name}"),
        })
    }

    fn load_head(&self) -> Result<(Height, AppHash), StoreError> {
        let meta = self.cf(CF_META)?;
        let height = match self
            .db
            .get_cf(meta, META_HEIGHT)
            .map_err(|e| io_error("RocksDB get failed", e))?
        {
            Some(raw) => {
                let bytes: [u8; 8] = raw.as_slice().try_into().map_err(|_| StoreError::Corrupted {
                    key: "meta/height".to_string(),
                    message: format!("expected 8 bytes, found {}", raw.len()),
                })?;
                u64::from_be_bytes(bytes)
            }
            None => 0,
        };
        let app_hash = match self
            .db
            .get_cf(meta, META_APP_HASH)
            .map_err(|e| io_error("RocksDB get failed", e))?
        {
            Some(raw) => raw.as_slice().try_into().map_err(|_| StoreError::Corrupted {
                key: "meta/app_hash".to_string(),
                message: format!("expected 32 bytes, found {}", raw.len()),
            })?,
            None => GENESIS_APP_HASH,
        };
        Ok((height, app_hash))
    }

    /// Newest committed entry for `key` at or below `height`.
    fn seek_version(&self, key: &[u8], height: Height) -> Result<Option<Option<Vec<u8>>>, StoreError> {
        let cf = self.cf(CF_VERSIONS)?;
        let prefix = key_prefix(key);
        let seek = versioned_key(key, height);
        let mut iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(&seek, Direction::Reverse));
        match iter.next() {
            Some(Ok((found, raw))) if found.starts_with(&prefix) && found.len() == prefix.len() + 8 => {
                decode_value(key, &raw).map(Some)
            }
            Some(Err(e)) => Err(io_error("RocksDB scan failed", e)),
            _ => Ok(None),
        }
    }

    fn has_history(&self, key: &[u8]) -> Result<bool, StoreError> {
        let cf = self.cf(CF_VERSIONS)?;
        let prefix = key_prefix(key);
        let seek = versioned_key(key, 0);
        let mut iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(&seek, Direction::Forward));
        match iter.next() {
            Some(Ok((found, _))) => Ok(found.starts_with(&prefix) && found.len() == prefix.len() + 8),
            Some(Err(e)) => Err(io_error("RocksDB scan failed", e)),
            None => Ok(false),
        }
    }
}

impl VersionedKvStore for RocksDbVersionedStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(staged) = self.working.lock().get(key) {
            return Ok(staged.clone());
        }
        Ok(self.seek_version(key, Height::MAX)?.flatten())
    }

    fn get_at_height(&self, key: &[u8], height: Height) -> Result<VersionedRead, StoreError> {
        let latest = self.head.read().0;
        if height > latest {
            return Err(StoreError::HeightNotCommitted {
                requested: height,
                latest,
            });
        }
        match self.seek_version(key, height)? {
            Some(Some(value)) => Ok(VersionedRead::Present(value)),
            Some(None) => Ok(VersionedRead::Absent),
            None if self.has_history(key)? => Ok(VersionedRead::Absent),
            None => Ok(VersionedRead::NeverWritten),
        }
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
        let mut head = self.head.write();
        let mut working = self.working.lock();

        let height = head.0 + 1;
        let app_hash = chain_app_hash(&head.1, height, &working);

        let versions = self.cf(CF_VERSIONS)?;
        let meta = self.cf(CF_META)?;
        let mut batch = WriteBatch::default();
        for (key, value) in working.iter() {
            let mut raw = Vec::with_capacity(1 + value.as_ref().map_or(0, Vec::len));
            match value {
                Some(bytes) => {
                    raw.push(TAG_PUT);
                    raw.extend_from_slice(bytes);
                }
                None => raw.push(TAG_DELETE),
            }
            batch.put_cf(versions, versioned_key(key, height), raw);
        }
        batch.put_cf(meta, META_HEIGHT, height.to_be_bytes());
        batch.put_cf(meta, META_APP_HASH, app_hash);

        let mut write_opts = rocksdb::WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        self.db
            .write_opt(batch, &write_opts)
            .map_err(|e| io_error("RocksDB batch write failed", e))?;

        working.clear();
        *head = (height, app_hash);
        Ok(CommitInfo { height, app_hash })
    }

    fn latest_height(&self) -> Height {
        self.head.read().0
    }

    fn app_hash(&self) -> AppHash {
        self.head.read().1
    }
}
