//! # Ledger Container
//!
//! Builds the state store the configuration asks for and exposes the
//! configuration types.

pub mod config;
pub mod store;

pub use config::{AppConfig, ConfigError, LedgerConfig, LoggingConfig, StoreBackend, StoreConfig};
pub use store::open_store;
