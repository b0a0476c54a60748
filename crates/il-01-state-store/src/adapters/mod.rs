pub mod memory_store;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_store;

pub use memory_store::InMemoryVersionedStore;
#[cfg(feature = "rocksdb")]
pub use rocksdb_store::{RocksDbConfig, RocksDbVersionedStore};
