//! # Shared Types Crate
//!
//! Types shared by every identity-ledger subsystem: roles, the tri-state
//! validity verdict, the closed error taxonomy and the `apply` / `query`
//! response envelopes.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: error codes and role names are defined once
//!   here and nowhere else.
//! - **Determinism**: nothing in this crate depends on time, randomness or
//!   hash-map iteration order.

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::*;
pub use envelope::*;
pub use errors::*;
