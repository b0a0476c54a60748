//! # Identity Entities

use serde::{Deserialize, Serialize};
use shared_types::Height;

/// One IdP's registration of an identity hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsqDestination {
    pub node_id: String,
    pub ial: f64,
    pub active: bool,
    pub first: bool,
    /// `0` means no lease.
    pub timeout_block: Height,
}

impl MsqDestination {
    /// Whether this entry still blocks other first-IdP registrations at
    /// `height`.
    pub fn holds_lease_at(&self, height: Height) -> bool {
        self.timeout_block != 0 && self.timeout_block > height
    }

    /// Active and not an abandoned first registration whose lease ran out.
    pub fn is_live_at(&self, height: Height) -> bool {
        self.active && (self.timeout_block == 0 || self.timeout_block > height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessor {
    pub accessor_type: String,
    pub accessor_public_key: String,
    pub accessor_group_id: String,
    /// Cleared by revocation, never set again.
    pub active: bool,
    pub owner: String,
}
