//! # il-01-state-store
//!
//! State Store Adapter for the identity ledger.
//!
//! ## Role in System
//!
//! - **Versioned KV contract**: `get`, `get_at_height`, `put`, `delete` over
//!   namespaced composite keys (`NodeID|<id>`, `Request|<id>`, ...)
//! - **All-or-nothing transactions**: every handler writes into a
//!   [`TxContext`] overlay that is either merged whole or dropped
//! - **Height-pinned reads**: [`QueryContext`] only sees what was committed
//!   at or before its height
//!
//! ## Write Path
//!
//! ```text
//!   handler ──put/delete──→ [TxContext overlay]
//!                                 │ Ok          │ Err
//!                                 ↓             ↓
//!                        [block working set]  dropped
//!                                 │
//!                              commit()
//!                                 ↓
//!                  [version log: key → {height → value}]
//!                                 ↑
//!   query(h) ───get_at_height─────┘
//! ```
//!
//! Records are bincode-encoded serde structs containing only ordered
//! collections, so identical logical state always yields identical bytes.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
pub use service::StateStore;
