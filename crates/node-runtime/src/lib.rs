//! # Node Runtime Library
//!
//! Application boundary of the identity ledger. The consensus engine calls
//! [`IdentityLedgerApp::apply`] for each transaction in ledger order,
//! [`IdentityLedgerApp::commit`] at the end of each block and
//! [`IdentityLedgerApp::query`] for reads at a pinned height.
//!
//! ## Modules
//!
//! - `app` - `IdentityLedgerApp`, the apply / query / commit boundary
//! - `container` - configuration and store construction
//! - `dispatch` - transaction decoding, caller authorization and routing
//! - `replay` - JSON-lines log replay used by the binary

pub mod app;
pub mod container;
pub mod dispatch;
pub mod replay;

pub use app::{IdentityLedgerApp, LedgerInfo};
pub use container::{AppConfig, ConfigError};
pub use dispatch::{MethodGate, Transaction};
