//! # Query Catalog
//!
//! Every read the ledger answers, as a closed enum. [`Query::decode`] turns
//! a method name plus JSON parameters into a variant; an unknown name or a
//! malformed parameter record is rejected before any state is read.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_types::{LedgerError, LedgerResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdQuery {
    pub node_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleQuery {
    /// Absent means every registered node.
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyNodeQuery {
    pub proxy_node_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIdQuery {
    pub service_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsIdQuery {
    pub as_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdpNodesQuery {
    /// When set, only IdPs holding this identity are listed.
    #[serde(default)]
    pub hash_id: Option<String>,
    #[serde(default)]
    pub min_ial: f64,
    #[serde(default)]
    pub min_aal: f64,
    /// When non-empty, only these IdPs are considered.
    #[serde(default)]
    pub node_id_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashIdQuery {
    pub hash_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityInfoQuery {
    pub hash_id: String,
    pub node_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorIdQuery {
    pub accessor_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorGroupIdQuery {
    pub accessor_group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSignatureQuery {
    pub node_id: String,
    pub service_id: String,
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProofQuery {
    pub request_id: String,
    pub idp_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestIdQuery {
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    // nodes
    GetNodePublicKey(NodeIdQuery),
    GetNodeMasterPublicKey(NodeIdQuery),
    GetNodeInfo(NodeIdQuery),
    GetMqAddresses(NodeIdQuery),
    GetNodeIdList(RoleQuery),
    GetNodesBehindProxyNode(ProxyNodeQuery),
    GetNodeToken(NodeIdQuery),
    GetIdpNodes(IdpNodesQuery),
    GetIdpNodesInfo(IdpNodesQuery),

    // directory
    GetNamespaceList,
    GetServiceDetail(ServiceIdQuery),
    GetServiceList,
    GetAsNodesByServiceId(ServiceIdQuery),
    GetAsNodesInfoByServiceId(ServiceIdQuery),
    GetServicesByAsId(AsIdQuery),

    // identities and accessors
    GetIdentityInfo(IdentityInfoQuery),
    CheckExistingIdentity(HashIdQuery),
    GetAccessorGroupId(AccessorIdQuery),
    GetAccessorKey(AccessorIdQuery),
    CheckExistingAccessorId(AccessorIdQuery),
    CheckExistingAccessorGroupId(AccessorGroupIdQuery),
    GetAccessorsInGroup(AccessorGroupIdQuery),

    // requests
    GetRequest(RequestIdQuery),
    GetRequestDetail(RequestIdQuery),
    GetDataSignature(DataSignatureQuery),
    GetIdentityProof(IdentityProofQuery),
}

fn params<T: DeserializeOwned>(bytes: &[u8]) -> LedgerResult<T> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::UnmarshalError(e.to_string()))
}

/// Empty input is accepted as `{}` for queries whose fields are all optional.
fn optional_params<T: DeserializeOwned + Default>(bytes: &[u8]) -> LedgerResult<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    params(bytes)
}

impl Query {
    pub fn decode(method: &str, bytes: &[u8]) -> LedgerResult<Self> {
        let query = match method {
            "GetNodePublicKey" => Query::GetNodePublicKey(params(bytes)?),
            "GetNodeMasterPublicKey" => Query::GetNodeMasterPublicKey(params(bytes)?),
            "GetNodeInfo" => Query::GetNodeInfo(params(bytes)?),
            "GetMqAddresses" => Query::GetMqAddresses(params(bytes)?),
            "GetNodeIDList" => Query::GetNodeIdList(optional_params(bytes)?),
            "GetNodesBehindProxyNode" => Query::GetNodesBehindProxyNode(params(bytes)?),
            "GetNodeToken" => Query::GetNodeToken(params(bytes)?),
            "GetIdpNodes" => Query::GetIdpNodes(optional_params(bytes)?),
            "GetIdpNodesInfo" => Query::GetIdpNodesInfo(optional_params(bytes)?),
            "GetNamespaceList" => Query::GetNamespaceList,
            "GetServiceDetail" => Query::GetServiceDetail(params(bytes)?),
            "GetServiceList" => Query::GetServiceList,
            "GetAsNodesByServiceId" => Query::GetAsNodesByServiceId(params(bytes)?),
            "GetAsNodesInfoByServiceId" => Query::GetAsNodesInfoByServiceId(params(bytes)?),
            "GetServicesByAsID" => Query::GetServicesByAsId(params(bytes)?),
            "GetIdentityInfo" => Query::GetIdentityInfo(params(bytes)?),
            "CheckExistingIdentity" => Query::CheckExistingIdentity(params(bytes)?),
            "GetAccessorGroupID" => Query::GetAccessorGroupId(params(bytes)?),
            "GetAccessorKey" => Query::GetAccessorKey(params(bytes)?),
            "CheckExistingAccessorID" => Query::CheckExistingAccessorId(params(bytes)?),
            "CheckExistingAccessorGroupID" => Query::CheckExistingAccessorGroupId(params(bytes)?),
            "GetAccessorsInGroup" => Query::GetAccessorsInGroup(params(bytes)?),
            "GetRequest" => Query::GetRequest(params(bytes)?),
            "GetRequestDetail" => Query::GetRequestDetail(params(bytes)?),
            "GetDataSignature" => Query::GetDataSignature(params(bytes)?),
            "GetIdentityProof" => Query::GetIdentityProof(params(bytes)?),
            _ => return Err(LedgerError::UnknownMethod(method.to_string())),
        };
        Ok(query)
    }
}
