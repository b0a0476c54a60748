//! Composite key layout.
//!
//! Every record lives under `"<EntityType>|<id>[|<id2>...]"`; the store
//! prepends a fixed namespace prefix before the key reaches the backend.

use std::fmt;

use shared_types::Role;

/// Key of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateKey {
    MasterNdid,
    Node(String),
    /// Append-only id list of one role.
    NodeList(Role),
    AllNodes,
    Token(String),
    TimeOutBlockRegisterIdentity,

    Proxy(String),
    BehindProxyNode(String),

    AllNamespace,
    Service(String),
    AllService,
    ServiceDestination(String),
    ProvideService(String),
    ApproveKey { service_id: String, node_id: String },

    MsqDestination(String),
    Accessor(String),
    AccessorGroup(String),
    AccessorInGroup(String),
    RevokedAccessorInGroup(String),

    Request(String),
    IdentityProof { request_id: String, idp_id: String },
    SignData {
        node_id: String,
        service_id: String,
        request_id: String,
    },
}

impl StateKey {
    pub fn node(id: impl Into<String>) -> Self {
        StateKey::Node(id.into())
    }

    pub fn request(id: impl Into<String>) -> Self {
        StateKey::Request(id.into())
    }

    pub fn approve(service_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        StateKey::ApproveKey {
            service_id: service_id.into(),
            node_id: node_id.into(),
        }
    }

    pub fn identity_proof(request_id: impl Into<String>, idp_id: impl Into<String>) -> Self {
        StateKey::IdentityProof {
            request_id: request_id.into(),
            idp_id: idp_id.into(),
        }
    }

    pub fn sign_data(
        node_id: impl Into<String>,
        service_id: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        StateKey::SignData {
            node_id: node_id.into(),
            service_id: service_id.into(),
            request_id: request_id.into(),
        }
    }

    /// Bytes handed to the backend.
    pub fn to_bytes(&self, prefix: &str) -> Vec<u8> {
        format!("{prefix}{self}").into_bytes()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKey::MasterNdid => f.write_str("MasterNDID"),
            StateKey::Node(id) => write!(f, "NodeID|{id}"),
            StateKey::NodeList(role) => match role {
                Role::Ndid => f.write_str("NDIDList"),
                Role::Rp => f.write_str("RPList"),
                Role::Idp => f.write_str("IdPList"),
                Role::As => f.write_str("ASList"),
                Role::Proxy => f.write_str("ProxyList"),
            },
            StateKey::AllNodes => f.write_str("AllList"),
            StateKey::Token(id) => write!(f, "Token|{id}"),
            StateKey::TimeOutBlockRegisterIdentity => f.write_str("TimeOutBlockRegisterIdentity"),
            StateKey::Proxy(id) => write!(f, "Proxy|{id}"),
            StateKey::BehindProxyNode(id) => write!(f, "BehindProxyNode|{id}"),
            StateKey::AllNamespace => f.write_str("AllNamespace"),
            StateKey::Service(id) => write!(f, "Service|{id}"),
            StateKey::AllService => f.write_str("AllService"),
            StateKey::ServiceDestination(id) => write!(f, "ServiceDestination|{id}"),
            StateKey::ProvideService(id) => write!(f, "ProvideService|{id}"),
            StateKey::ApproveKey {
                service_id,
                node_id,
            } => write!(f, "ApproveKey|{service_id}|{node_id}"),
            StateKey::MsqDestination(hash) => write!(f, "MsqDestination|{hash}"),
            StateKey::Accessor(id) => write!(f, "Accessor|{id}"),
            StateKey::AccessorGroup(id) => write!(f, "AccessorGroup|{id}"),
            StateKey::AccessorInGroup(id) => write!(f, "AccessorInGroup|{id}"),
            StateKey::RevokedAccessorInGroup(id) => write!(f, "RevokedAccessorInGroup|{id}"),
            StateKey::Request(id) => write!(f, "Request|{id}"),
            StateKey::IdentityProof { request_id, idp_id } => {
                write!(f, "IdentityProof|{request_id}|{idp_id}")
            }
            StateKey::SignData {
                node_id,
                service_id,
                request_id,
            } => write!(f, "SignData|{node_id}|{service_id}|{request_id}"),
        }
    }
}
