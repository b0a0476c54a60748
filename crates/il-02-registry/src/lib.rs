//! # il-02-registry
//!
//! Registry subsystem: who is on the ledger and what they may do.
//!
//! ## Contents
//!
//! - **Nodes**: NDID bootstrap, registration with an immutable role,
//!   self-service key rotation, NDID updates, enable/disable, per-role
//!   append-only id lists
//! - **Proxy associations**: `Proxy|<node>` plus the reverse
//!   `BehindProxyNode|<proxy>` index, always updated together
//! - **Directory**: namespaces, services, NDID approvals and AS service
//!   destinations
//! - **Token accounts** and the identity-registration lease length
//!
//! Every handler takes a [`TxContext`](il_01_state_store::TxContext) and a
//! typed parameter record. The lookups in [`service::lookups`] are the
//! existence/active checks the other subsystems build on.

pub mod domain;
pub mod service;
pub mod test_utils;

pub use domain::*;
pub use service::*;
