//! # il-04-identity
//!
//! Identity and accessor lifecycle.
//!
//! ## Identity Registration Leases
//!
//! `MsqDestination|<hash>` lists every IdP that holds an identity. An IdP
//! that registers with `first = true` takes a lease that expires at
//! `timeout_block`. While any lease on the hash is live no other IdP may
//! register as first; the holder can release it early with
//! `clearRegisterIdentityTimeout`, but only before it expires.
//!
//! ```text
//!   height:   h ──────────────────────── h + lease ──────────→
//!   IdP A:    [first, live lease] ........ expired
//!   IdP B:    first → NotFirstIdP          first → ok
//!   IdP C:    non-first → ok (no lease)
//! ```
//!
//! ## Accessors
//!
//! Accessors are keys bound to an identity, grouped under an accessor group.
//! Adding a key to an existing group or revoking one requires a closed,
//! fully-accepted onboarding request of the matching purpose that has never
//! been used before. Consuming the request bumps its `use_count`.

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::*;
