use serde::{Deserialize, Serialize};
use shared_types::Verdict;

use crate::domain::entities::{RequestPurpose, ResponseStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequestParams {
    pub service_id: String,
    #[serde(default)]
    pub as_id_list: Vec<String>,
    pub min_as: u32,
    #[serde(default)]
    pub request_params_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRequestParams {
    pub request_id: String,
    pub mode: u32,
    pub min_idp: u32,
    #[serde(default)]
    pub min_ial: f64,
    #[serde(default)]
    pub min_aal: f64,
    #[serde(default)]
    pub request_timeout: u64,
    #[serde(default)]
    pub idp_id_list: Vec<String>,
    #[serde(default)]
    pub data_request_list: Vec<DataRequestParams>,
    #[serde(default)]
    pub request_message_hash: String,
    #[serde(default)]
    pub purpose: RequestPurpose,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIdpResponseParams {
    pub request_id: String,
    pub ial: f64,
    pub aal: f64,
    pub status: ResponseStatus,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub identity_proof: String,
    #[serde(default)]
    pub private_proof_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareIdentityProofParams {
    pub request_id: String,
    pub identity_proof: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDataParams {
    pub request_id: String,
    pub service_id: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDataReceivedParams {
    pub request_id: String,
    pub service_id: String,
    pub as_id: String,
}

/// Owner's judgement of one IdP's response. `Unset` fields leave the
/// stored verdict as it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseValid {
    pub idp_id: String,
    #[serde(default)]
    pub valid_proof: Verdict,
    #[serde(default)]
    pub valid_ial: Verdict,
    #[serde(default)]
    pub valid_signature: Verdict,
}

/// Shared by `CloseRequest` and `TimeOutRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishRequestParams {
    pub request_id: String,
    #[serde(default)]
    pub response_valid_list: Vec<ResponseValid>,
}
