//! Parameter records of the registry transactions.
//!
//! Optional fields default to their zero value; update handlers treat a
//! zero value as "leave unchanged".

use serde::{Deserialize, Serialize};
use shared_types::MqAddress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitNdidParams {
    pub node_id: String,
    pub public_key: String,
    #[serde(default)]
    pub master_public_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterNodeParams {
    pub node_id: String,
    pub public_key: String,
    #[serde(default)]
    pub master_public_key: String,
    #[serde(default)]
    pub node_name: String,
    pub role: String,
    #[serde(default)]
    pub max_ial: f64,
    #[serde(default)]
    pub max_aal: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNodeParams {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub master_public_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNodeByNdidParams {
    pub node_id: String,
    #[serde(default)]
    pub node_name: String,
    #[serde(default)]
    pub max_ial: f64,
    #[serde(default)]
    pub max_aal: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdParams {
    pub node_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMqAddressesParams {
    pub addresses: Vec<MqAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddNodeToProxyNodeParams {
    pub node_id: String,
    pub proxy_node_id: String,
    #[serde(default)]
    pub config: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNodeProxyNodeParams {
    pub node_id: String,
    pub proxy_node_id: String,
    /// `None` keeps the current config.
    #[serde(default)]
    pub config: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceParams {
    pub namespace: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceParams {
    pub service_id: String,
    #[serde(default)]
    pub service_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIdParams {
    pub service_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceApprovalParams {
    pub service_id: String,
    pub node_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDestinationParams {
    pub service_id: String,
    #[serde(default)]
    pub min_ial: f64,
    #[serde(default)]
    pub min_aal: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOutBlockParams {
    pub timeout_block: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParams {
    pub node_id: String,
    pub amount: u64,
}
