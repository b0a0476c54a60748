//! # Transaction Dispatch
//!
//! `apply(method, params, caller)` is decoded into a closed [`Transaction`],
//! authorized against the caller's role and routed to its handler:
//!
//! ```text
//!   method + JSON ──decode──→ Transaction ──authorize──→ execute
//!                     │                         │            │
//!               UnknownMethod          NotNdid / UnknownCaller /
//!               UnmarshalError         NodeIsNotActive / RoleNotAllowed
//! ```

pub mod gate;
pub mod router;
pub mod transaction;

pub use gate::authorize;
pub use router::execute;
pub use transaction::{MethodGate, Transaction};
