//! # Identity Ledger Test Suite
//!
//! Cross-crate tests driven through `IdentityLedgerApp`, the same
//! apply / commit / query boundary the consensus engine uses.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs      # Ledger wrapper and the standard test network
//!     ├── scenarios.rs    # Verification, data and registration flows
//!     ├── onboarding.rs   # Accessor groups and the onboarding requests
//!     ├── properties.rs   # Laws that must hold after any sequence
//!     └── directory.rs    # Proxies, services and height-pinned reads
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p il-tests
//! cargo test -p il-tests integration::properties::
//! ```

pub mod integration;
