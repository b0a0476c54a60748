//! # Core Domain Entities
//!
//! Small value types every ledger subsystem agrees on.
//!
//! ## Contents
//!
//! - **Heights**: `Height`, the versioning axis of the store
//! - **Roles**: `Role`, fixed at registration
//! - **Judgements**: `Verdict`, the unset/valid/invalid annotation an RP
//!   attaches to each IdP response when it closes a request
//! - **Connectivity**: `MqAddress`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Ledger height: the sequence number of a committed block.
pub type Height = u64;

// =============================================================================
// ROLES
// =============================================================================

/// Role of a registered node. Immutable after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "NDID")]
    Ndid,
    #[serde(rename = "RP")]
    Rp,
    #[serde(rename = "IdP")]
    Idp,
    #[serde(rename = "AS")]
    As,
    #[serde(rename = "Proxy")]
    Proxy,
}

impl Role {
    /// Canonical wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Ndid => "NDID",
            Role::Rp => "RP",
            Role::Idp => "IdP",
            Role::As => "AS",
            Role::Proxy => "Proxy",
        }
    }

    /// Roles that `RegisterNode` may assign. NDID is only created by `InitNDID`.
    pub fn is_registrable(&self) -> bool {
        !matches!(self, Role::Ndid)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LedgerError;

    /// Role names are matched case-insensitively ("idp", "IdP", "IDP").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ndid" => Ok(Role::Ndid),
            "rp" => Ok(Role::Rp),
            "idp" => Ok(Role::Idp),
            "as" => Ok(Role::As),
            "proxy" => Ok(Role::Proxy),
            _ => Err(LedgerError::WrongRole(s.to_string())),
        }
    }
}

// =============================================================================
// VERDICT
// =============================================================================

/// Three-valued validity annotation.
///
/// Serialized as `null` / `true` / `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Verdict {
    #[default]
    Unset,
    Valid,
    Invalid,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl From<Option<bool>> for Verdict {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Verdict::Unset,
            Some(true) => Verdict::Valid,
            Some(false) => Verdict::Invalid,
        }
    }
}

impl From<Verdict> for Option<bool> {
    fn from(value: Verdict) -> Self {
        match value {
            Verdict::Unset => None,
            Verdict::Valid => Some(true),
            Verdict::Invalid => Some(false),
        }
    }
}

// =============================================================================
// CONNECTIVITY
// =============================================================================

/// A message-queue endpoint published by a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqAddress {
    pub ip: String,
    pub port: u16,
}
