use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRegistration {
    pub hash_id: String,
    pub ial: f64,
    #[serde(default)]
    pub first: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterIdentityParams {
    pub users: Vec<IdentityRegistration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateIdentityParams {
    pub hash_id: String,
    /// Ignored unless positive.
    #[serde(default)]
    pub ial: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashIdParams {
    pub hash_id: String,
}

/// `CreateIdentity` / `registerAccessor`: first key of a new group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIdentityParams {
    pub accessor_id: String,
    pub accessor_type: String,
    pub accessor_public_key: String,
    pub accessor_group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAccessorMethodParams {
    pub request_id: String,
    pub accessor_id: String,
    pub accessor_type: String,
    pub accessor_public_key: String,
    pub accessor_group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeAccessorMethodParams {
    pub accessor_id_list: Vec<String>,
    pub request_id: String,
}
