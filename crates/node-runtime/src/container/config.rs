//! # Node Configuration
//!
//! Unified configuration for the store, the ledger rules and logging.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. A JSON file (`--config <path>`)
//! 3. Environment overrides: `IL_DATA_DIR`, `IL_STORE_BACKEND`,
//!    `IL_LOG_LEVEL`, `IL_REGISTER_IDENTITY_TIMEOUT`

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_DATA_DIR: &str = "IL_DATA_DIR";
pub const ENV_STORE_BACKEND: &str = "IL_STORE_BACKEND";
pub const ENV_LOG_LEVEL: &str = "IL_LOG_LEVEL";
pub const ENV_REGISTER_IDENTITY_TIMEOUT: &str = "IL_REGISTER_IDENTITY_TIMEOUT";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("ledger.key_prefix must not be empty")]
    EmptyKeyPrefix,
    #[error("ledger.default_register_identity_timeout must be greater than zero")]
    ZeroRegisterIdentityTimeout,
    #[error("store backend {0} is not compiled into this binary")]
    BackendUnavailable(StoreBackend),
}

impl AppConfig {
    /// Defaults, then `path` when given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `IL_*` overrides found through `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.store.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(ENV_STORE_BACKEND) {
            self.store.backend = backend.parse()?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(blocks) = lookup(ENV_REGISTER_IDENTITY_TIMEOUT) {
            self.ledger.default_register_identity_timeout =
                blocks.parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_REGISTER_IDENTITY_TIMEOUT,
                    value: blocks.clone(),
                })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.key_prefix.is_empty() {
            return Err(ConfigError::EmptyKeyPrefix);
        }
        if self.ledger.default_register_identity_timeout == 0 {
            return Err(ConfigError::ZeroRegisterIdentityTimeout);
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level",
                value: self.logging.level.clone(),
            });
        }
        if self.store.backend == StoreBackend::RocksDb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::BackendUnavailable(StoreBackend::RocksDb));
        }
        Ok(())
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    RocksDb,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "rocksdb" => Ok(StoreBackend::RocksDb),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_STORE_BACKEND,
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => f.write_str("memory"),
            StoreBackend::RocksDb => f.write_str("rocksdb"),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Database directory for the persistent backend.
    pub data_dir: PathBuf,
    /// RocksDB block cache size in bytes.
    pub block_cache_size: usize,
    /// fsync every commit.
    pub sync_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            data_dir: PathBuf::from("./data/ledger"),
            block_cache_size: 64 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

// =============================================================================
// LEDGER
// =============================================================================

/// Ledger rules fixed for the lifetime of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Namespace prefix in front of every stored key.
    pub key_prefix: String,
    /// Registration lease in blocks, used until NDID sets one on chain.
    pub default_register_identity_timeout: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            key_prefix: "identity-ledger:".to_string(),
            default_register_identity_timeout: 500,
        }
    }
}

// =============================================================================
// LOGGING
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
