//! # il-03-request-protocol
//!
//! The verification request state machine shared by RP, IdP and AS nodes.
//!
//! ## Request Lifecycle
//!
//! ```text
//!                 createRequest (RP / IdP)
//!                         │
//!                         ↓
//!   ┌──────────────────[ Open ]─────────────────────┐
//!   │  declareIdentityProof (IdP, mode 3)           │
//!   │  createIdpResponse    (IdP, ≤ min_idp)        │
//!   │  signData             (AS,  ≤ min_as)         │
//!   │  setDataReceived      (owner)                 │
//!   └──────┬─────────────────────────────┬──────────┘
//!          │ closeRequest                │ timeOutRequest
//!          ↓                             ↓
//!      [ Closed ]                   [ TimedOut ]      (terminal)
//! ```
//!
//! Closing or timing out attaches the owner's validity verdicts to each IdP
//! response. Those verdicts are what accessor onboarding and revocation
//! count as acceptance.

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::*;
