//! # Registry Entities
//!
//! Stored records owned by the registry. All collections are `Vec`s so the
//! bincode encoding is canonical.

use serde::{Deserialize, Serialize};
use shared_types::{MqAddress, Role};

/// `NodeID|<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDetail {
    pub public_key: String,
    pub master_public_key: String,
    pub node_name: String,
    pub role: Role,
    pub active: bool,
    /// IdP only; zero for every other role.
    pub max_ial: f64,
    /// IdP only; zero for every other role.
    pub max_aal: f64,
    pub mq: Vec<MqAddress>,
}

impl NodeDetail {
    pub fn is_proxy(&self) -> bool {
        self.role == Role::Proxy
    }
}

/// `Proxy|<node>`: the node's traffic goes through `proxy_node_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyLink {
    pub proxy_node_id: String,
    pub config: String,
}

/// Entry of the `AllNamespace` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub namespace: String,
    pub description: String,
    pub active: bool,
}

/// `Service|<id>`, also mirrored in the `AllService` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetail {
    pub service_id: String,
    pub service_name: String,
    pub active: bool,
}

/// Entry of `ServiceDestination|<service>`: one AS offering the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDestination {
    pub node_id: String,
    pub min_ial: f64,
    pub min_aal: f64,
    pub active: bool,
}

/// `ApproveKey|<service>|<node>`: NDID permission for an AS to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub active: bool,
}

/// `Token|<node>`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
    pub amount: u64,
}
