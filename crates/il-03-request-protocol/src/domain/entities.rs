//! # Request Entities
//!
//! `Request|<id>` holds the whole request, including its data requests and
//! IdP responses. Every list is append-only and keeps arrival order.

use serde::{Deserialize, Serialize};
use shared_types::Verdict;

/// Mode that requires an identity proof declaration before the response.
pub const MODE_IDENTITY_PROOF: u32 = 3;

/// Request modes the protocol understands.
pub const SUPPORTED_MODES: [u32; 3] = [1, 2, MODE_IDENTITY_PROOF];

/// What the request is for. Accessor operations only accept the matching
/// purpose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestPurpose {
    #[default]
    #[serde(rename = "")]
    Verification,
    AddAccessor,
    RevokeAccessor,
}

impl RequestPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPurpose::Verification => "",
            RequestPurpose::AddAccessor => "AddAccessor",
            RequestPurpose::RevokeAccessor => "RevokeAccessor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Accept,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    pub service_id: String,
    /// Empty means any approved AS may answer.
    pub as_id_list: Vec<String>,
    pub min_as: u32,
    pub request_params_hash: String,
    pub answered_as_id_list: Vec<String>,
    pub received_data_from_list: Vec<String>,
}

impl DataRequest {
    pub fn is_open_to(&self, as_id: &str) -> bool {
        self.as_id_list.is_empty() || self.as_id_list.iter().any(|id| id == as_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub idp_id: String,
    pub ial: f64,
    pub aal: f64,
    pub status: ResponseStatus,
    pub signature: String,
    pub identity_proof: String,
    pub private_proof_hash: String,
    pub valid_proof: Verdict,
    pub valid_ial: Verdict,
    pub valid_signature: Verdict,
}

impl Response {
    /// An accept the owner judged valid on every count.
    pub fn is_valid_accept(&self) -> bool {
        self.status == ResponseStatus::Accept
            && self.valid_proof.is_valid()
            && self.valid_ial.is_valid()
            && self.valid_signature.is_valid()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub request_id: String,
    pub owner: String,
    pub mode: u32,
    pub min_idp: u32,
    pub min_ial: f64,
    pub min_aal: f64,
    pub request_timeout: u64,
    /// Empty means any IdP may respond.
    pub idp_id_list: Vec<String>,
    pub data_request_list: Vec<DataRequest>,
    pub request_message_hash: String,
    pub response_list: Vec<Response>,
    pub closed: bool,
    pub timed_out: bool,
    /// Set when the creator is an IdP (self-service onboarding).
    pub can_add_accessor: bool,
    pub use_count: u32,
    pub purpose: RequestPurpose,
}

impl Request {
    pub fn is_terminal(&self) -> bool {
        self.closed || self.timed_out
    }

    pub fn has_enough_responses(&self) -> bool {
        self.response_list.len() >= self.min_idp as usize
    }

    pub fn data_request(&self, service_id: &str) -> Option<&DataRequest> {
        self.data_request_list
            .iter()
            .find(|dr| dr.service_id == service_id)
    }

    pub fn data_request_mut(&mut self, service_id: &str) -> Option<&mut DataRequest> {
        self.data_request_list
            .iter_mut()
            .find(|dr| dr.service_id == service_id)
    }

    /// Responses counted toward accessor operations.
    pub fn valid_accepts(&self) -> impl Iterator<Item = &Response> {
        self.response_list.iter().filter(|r| r.is_valid_accept())
    }

    /// A single-use onboarding request that has not been consumed yet.
    pub fn is_special_and_unused(&self) -> bool {
        self.can_add_accessor && self.use_count == 0
    }
}

/// `IdentityProof|<request>|<idp>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProofRecord {
    pub identity_proof: String,
}

/// `SignData|<as>|<service>|<request>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedData {
    pub signature: String,
}
