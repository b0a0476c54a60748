//! # Query Results
//!
//! JSON shapes returned to callers. Lists are always present, empty when
//! nothing matches.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{MqAddress, Role};

use il_02_registry::{Namespace, ServiceDetail};
use il_03_request_protocol::{DataRequest, RequestPurpose, Response};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyView {
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterPublicKeyView {
    pub master_public_key: String,
}

/// Connection details of the proxy a node sits behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyView {
    pub node_id: String,
    pub node_name: String,
    pub public_key: String,
    pub master_public_key: String,
    pub mq: Vec<MqAddress>,
    pub config: String,
}

/// Identity attributes are the node's own. Exactly one of `mq` and `proxy`
/// is present: nodes behind a proxy are reached through it.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfoView {
    pub public_key: String,
    pub master_public_key: String,
    pub node_name: String,
    pub role: Role,
    pub active: bool,
    /// IdP only.
    pub max_ial: Option<f64>,
    /// IdP only.
    pub max_aal: Option<f64>,
    pub mq: Option<Vec<MqAddress>>,
    pub proxy: Option<ProxyView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdListView {
    pub node_id_list: Vec<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehindProxyNodeView {
    pub node_id: String,
    pub node_name: String,
    pub role: Role,
    pub public_key: String,
    pub master_public_key: String,
    pub max_ial: Option<f64>,
    pub max_aal: Option<f64>,
    pub config: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodesBehindProxyView {
    pub nodes: Vec<BehindProxyNodeView>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenView {
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdpNodeView {
    pub node_id: String,
    pub name: String,
    pub max_ial: f64,
    pub max_aal: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdpNodesView {
    pub node: Vec<IdpNodeView>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdpNodeInfoView {
    pub node_id: String,
    pub name: String,
    pub max_ial: f64,
    pub max_aal: f64,
    pub public_key: String,
    pub mq: Option<Vec<MqAddress>>,
    pub proxy: Option<ProxyView>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdpNodesInfoView {
    pub node: Vec<IdpNodeInfoView>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceListView(pub Vec<Namespace>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceListView(pub Vec<ServiceDetail>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsNodeView {
    pub node_id: String,
    pub name: String,
    pub min_ial: f64,
    pub min_aal: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsNodesView {
    pub node: Vec<AsNodeView>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsNodeInfoView {
    pub node_id: String,
    pub name: String,
    pub min_ial: f64,
    pub min_aal: f64,
    pub public_key: String,
    pub mq: Option<Vec<MqAddress>>,
    pub proxy: Option<ProxyView>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsNodesInfoView {
    pub node: Vec<AsNodeInfoView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvidedServiceView {
    pub service_id: String,
    pub min_ial: f64,
    pub min_aal: f64,
    pub active: bool,
    /// The NDID approval was withdrawn.
    pub suspended: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicesByAsView {
    pub services: Vec<ProvidedServiceView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdentityInfoView {
    pub ial: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistView {
    pub exist: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorGroupIdView {
    pub accessor_group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorKeyView {
    pub accessor_public_key: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorsInGroupView {
    pub accessor_id_list: Vec<String>,
    pub revoked_accessor_id_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummaryView {
    pub closed: bool,
    pub timed_out: bool,
    pub mode: u32,
    pub request_message_hash: String,
}

/// Full request as stored, plus `special`: whether the owner is an IdP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDetailView {
    pub request_id: String,
    pub requester_node_id: String,
    pub mode: u32,
    pub min_idp: u32,
    pub min_ial: f64,
    pub min_aal: f64,
    pub request_timeout: u64,
    pub idp_id_list: Vec<String>,
    pub data_request_list: Vec<DataRequest>,
    pub request_message_hash: String,
    pub response_list: Vec<Response>,
    pub closed: bool,
    pub timed_out: bool,
    pub special: bool,
    pub use_count: u32,
    pub purpose: RequestPurpose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureView {
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProofView {
    pub identity_proof: String,
}
