//! # il-05-query-engine
//!
//! Read path of the ledger.
//!
//! Every query is a pure function of its parameters and a committed height:
//! the engine pins a [`QueryContext`](il_01_state_store::QueryContext) to the
//! requested height (`0` = latest), decodes the method into a [`Query`], and
//! answers JSON plus a status string.
//!
//! ## Status Strings
//!
//! | Status | Meaning |
//! |---|---|
//! | `success` | evaluated; lists may still be empty |
//! | `not found` | the primary key is absent |
//! | `service is not active` | the service exists but is disabled |
//! | anything else | literal error: bad method, bad params, future height |
//!
//! ## Proxy Resolution
//!
//! A node with a `Proxy|<node>` record is reached through its proxy: message
//! queue addresses and the proxy keys come from the proxy's `NodeDetail`,
//! while name, role and assurance limits stay the node's own. A proxy record
//! that points at a missing node is reported as an error.

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::*;
