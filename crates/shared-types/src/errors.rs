//! # Error Types
//!
//! The closed error taxonomy shared by every ledger subsystem.
//!
//! A handler never panics or retries: it returns one of these variants, the
//! dispatcher turns it into a `(code, log)` pair and the transaction's writes
//! are discarded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used by all handlers.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Result code for a successful transaction.
pub const CODE_OK: u32 = 0;

/// Coarse classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    NotFound,
    DuplicateId,
    InvalidState,
    PolicyViolation,
    Unauthorized,
    MalformedInput,
    InternalEncoding,
}

/// Every way a transaction can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ------------------------------------------------------------------
    // NotFound
    // ------------------------------------------------------------------
    #[error("Node ID not found: {0}")]
    NodeIdNotFound(String),
    #[error("Request ID not found: {0}")]
    RequestIdNotFound(String),
    #[error("Service ID not found: {0}")]
    ServiceIdNotFound(String),
    #[error("Hash ID not found: {0}")]
    HashIdNotFound(String),
    #[error("Accessor group ID not found: {0}")]
    AccessorGroupIdNotFound(String),
    #[error("Accessor ID not found: {0}")]
    AccessorIdNotFound(String),
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),
    #[error("Service destination not found: service {service_id}, node {node_id}")]
    ServiceDestinationNotFound { service_id: String, node_id: String },
    #[error("Service destination approval not found: service {service_id}, node {node_id}")]
    ApprovalNotFound { service_id: String, node_id: String },
    #[error("Token account not found: {0}")]
    TokenAccountNotFound(String),
    #[error("Proxy node not found: {0}")]
    ProxyNodeNotFound(String),
    #[error("Service {service_id} is not part of request {request_id}")]
    ServiceIdNotFoundInRequest {
        request_id: String,
        service_id: String,
    },

    // ------------------------------------------------------------------
    // DuplicateId
    // ------------------------------------------------------------------
    #[error("Duplicate node ID: {0}")]
    DuplicateNodeId(String),
    #[error("Duplicate request ID: {0}")]
    DuplicateRequestId(String),
    #[error("Duplicate service ID: {0}")]
    DuplicateServiceId(String),
    #[error("Duplicate service ID in data request: {0}")]
    DuplicateServiceIdInDataRequest(String),
    #[error("Duplicate accessor ID: {0}")]
    DuplicateAccessorId(String),
    #[error("Duplicate accessor group ID: {0}")]
    DuplicateAccessorGroupId(String),
    #[error("Duplicate namespace: {0}")]
    DuplicateNamespace(String),
    #[error("Duplicate response from IdP {0}")]
    DuplicateResponse(String),
    #[error("Duplicate identity proof: request {request_id}, IdP {idp_id}")]
    DuplicateIdentityProof { request_id: String, idp_id: String },
    #[error("Duplicate answered AS ID: {0}")]
    DuplicateAnsweredAsIdList(String),
    #[error("Duplicate AS in received data list: {0}")]
    DuplicateAsInDataRequest(String),
    #[error("Identity {hash_id} is already registered by node {node_id}")]
    DuplicateIdentityRegistration { hash_id: String, node_id: String },

    // ------------------------------------------------------------------
    // InvalidState
    // ------------------------------------------------------------------
    #[error("Request is closed: {0}")]
    RequestIsClosed(String),
    #[error("Request is timed out: {0}")]
    RequestIsTimedOut(String),
    #[error("Request is completed: {0}")]
    RequestIsCompleted(String),
    #[error("Request is not closed: {0}")]
    RequestIsNotClosed(String),
    #[error("Data request is completed: service {0}")]
    DataRequestIsCompleted(String),
    #[error("Service is not active: {0}")]
    ServiceIsNotActive(String),
    #[error("Service destination is not active: service {service_id}, node {node_id}")]
    ServiceDestinationIsNotActive { service_id: String, node_id: String },
    #[error("Node is not active: {0}")]
    NodeIsNotActive(String),
    #[error("Accessor is already revoked: {0}")]
    AccessorIsRevoked(String),
    #[error("Registration lease for {0} has already timed out")]
    MsqDestinationIsTimedOut(String),
    #[error("NDID is already initialized")]
    NdidAlreadyInitialized,

    // ------------------------------------------------------------------
    // PolicyViolation
    // ------------------------------------------------------------------
    #[error("IAL error: {0}")]
    IalError(String),
    #[error("AAL error: {0}")]
    AalError(String),
    #[error("Not first IdP for identity {0}")]
    NotFirstIdp(String),
    #[error("Wrong identity proof from IdP {0}")]
    WrongIdentityProof(String),
    #[error("IdP {0} is not in the request's IdP list")]
    NotInIdpList(String),
    #[error("Request is not completed: {accepted} valid accepts, need {min_idp}")]
    RequestIsNotCompleted { accepted: usize, min_idp: u32 },
    #[error("Invalid mode: {0}")]
    InvalidMode(u32),
    #[error("Invalid min_idp: {0}")]
    InvalidMinIdp(u32),
    #[error("Request is not special: {0}")]
    RequestIsNotSpecial(String),
    #[error("Request purpose must be {expected}")]
    InvalidPurpose { expected: String },
    #[error("Accepted response on {request_id} belongs to {idp_id}, not the caller")]
    NotOwnerOfResponse { request_id: String, idp_id: String },
    #[error("Node {node_id} does not own accessor {accessor_id}")]
    NotOwnerOfAccessor {
        accessor_id: String,
        node_id: String,
    },
    #[error("Node {node_id} is not the owner of request {request_id}")]
    NotRequestOwner { request_id: String, node_id: String },
    #[error("Node {0} is not in the AS list of the data request")]
    NodeIdIsNotExistInAsList(String),
    #[error("AS {0} has not answered the data request")]
    AsIdIsNotExistInAnsweredAsList(String),
    #[error("Wrong role: {0}")]
    WrongRole(String),
    #[error("No permission to register service destination: service {service_id}, node {node_id}")]
    NoPermissionForRegisterServiceDestination { service_id: String, node_id: String },
    #[error("Service destination is not approved: service {service_id}, node {node_id}")]
    ServiceDestinationIsNotApproved { service_id: String, node_id: String },
    #[error("Timeout block must be greater than zero")]
    TimeOutBlockIsMustGreaterThanZero,
    #[error("Token not enough: balance {balance}, requested {requested}")]
    TokenNotEnough { balance: u64, requested: u64 },
    #[error("Token balance overflow: balance {balance}, requested {requested}")]
    TokenBalanceOverflow { balance: u64, requested: u64 },
    #[error("Registration lease of {lease} blocks from height {height} overflows")]
    TimeOutBlockIsTooLarge { height: u64, lease: u64 },
    #[error("Node {0} is not a proxy node")]
    NodeIsNotProxy(String),
    #[error("Node {0} is a proxy node")]
    NodeIsProxy(String),
    #[error("Node {0} is already behind a proxy node")]
    NodeIsAlreadyBehindProxy(String),
    #[error("Node {0} is not behind a proxy node")]
    NodeIsNotBehindProxy(String),

    // ------------------------------------------------------------------
    // Unauthorized
    // ------------------------------------------------------------------
    #[error("Caller {0} is not the NDID node")]
    NotNdid(String),
    #[error("Role {role} may not call {method}")]
    RoleNotAllowed { role: String, method: String },
    #[error("Unknown caller: {0}")]
    UnknownCaller(String),

    // ------------------------------------------------------------------
    // MalformedInput
    // ------------------------------------------------------------------
    #[error("Unknown method: {0}")]
    UnknownMethod(String),
    #[error("Unmarshal error: {0}")]
    UnmarshalError(String),

    // ------------------------------------------------------------------
    // InternalEncoding
    // ------------------------------------------------------------------
    #[error("Marshal error: {0}")]
    MarshalError(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        use LedgerError::*;
        match self {
            NodeIdNotFound(_)
            | RequestIdNotFound(_)
            | ServiceIdNotFound(_)
            | HashIdNotFound(_)
            | AccessorGroupIdNotFound(_)
            | AccessorIdNotFound(_)
            | NamespaceNotFound(_)
            | ServiceDestinationNotFound { .. }
            | ApprovalNotFound { .. }
            | TokenAccountNotFound(_)
            | ProxyNodeNotFound(_)
            | ServiceIdNotFoundInRequest { .. } => ErrorCategory::NotFound,

            DuplicateNodeId(_)
            | DuplicateRequestId(_)
            | DuplicateServiceId(_)
            | DuplicateServiceIdInDataRequest(_)
            | DuplicateAccessorId(_)
            | DuplicateAccessorGroupId(_)
            | DuplicateNamespace(_)
            | DuplicateResponse(_)
            | DuplicateIdentityProof { .. }
            | DuplicateAnsweredAsIdList(_)
            | DuplicateAsInDataRequest(_)
            | DuplicateIdentityRegistration { .. } => ErrorCategory::DuplicateId,

            RequestIsClosed(_)
            | RequestIsTimedOut(_)
            | RequestIsCompleted(_)
            | RequestIsNotClosed(_)
            | DataRequestIsCompleted(_)
            | ServiceIsNotActive(_)
            | ServiceDestinationIsNotActive { .. }
            | NodeIsNotActive(_)
            | AccessorIsRevoked(_)
            | MsqDestinationIsTimedOut(_)
            | NdidAlreadyInitialized => ErrorCategory::InvalidState,

            IalError(_)
            | AalError(_)
            | NotFirstIdp(_)
            | WrongIdentityProof(_)
            | NotInIdpList(_)
            | RequestIsNotCompleted { .. }
            | InvalidMode(_)
            | InvalidMinIdp(_)
            | RequestIsNotSpecial(_)
            | InvalidPurpose { .. }
            | NotOwnerOfResponse { .. }
            | NotOwnerOfAccessor { .. }
            | NotRequestOwner { .. }
            | NodeIdIsNotExistInAsList(_)
            | AsIdIsNotExistInAnsweredAsList(_)
            | WrongRole(_)
            | NoPermissionForRegisterServiceDestination { .. }
            | ServiceDestinationIsNotApproved { .. }
            | TimeOutBlockIsMustGreaterThanZero
            | TokenNotEnough { .. }
            | TokenBalanceOverflow { .. }
            | TimeOutBlockIsTooLarge { .. }
            | NodeIsNotProxy(_)
            | NodeIsProxy(_)
            | NodeIsAlreadyBehindProxy(_)
            | NodeIsNotBehindProxy(_) => ErrorCategory::PolicyViolation,

            NotNdid(_) | RoleNotAllowed { .. } | UnknownCaller(_) => ErrorCategory::Unauthorized,

            UnknownMethod(_) | UnmarshalError(_) => ErrorCategory::MalformedInput,

            MarshalError(_) | Storage(_) => ErrorCategory::InternalEncoding,
        }
    }

    /// Stable numeric result code reported at the transaction boundary.
    ///
    /// Codes are grouped by category in blocks of 100 and never reused.
    pub fn code(&self) -> u32 {
        use LedgerError::*;
        match self {
            NodeIdNotFound(_) => 101,
            RequestIdNotFound(_) => 102,
            ServiceIdNotFound(_) => 103,
            HashIdNotFound(_) => 104,
            AccessorGroupIdNotFound(_) => 105,
            AccessorIdNotFound(_) => 106,
            NamespaceNotFound(_) => 107,
            ServiceDestinationNotFound { .. } => 108,
            ApprovalNotFound { .. } => 109,
            TokenAccountNotFound(_) => 110,
            ProxyNodeNotFound(_) => 111,
            ServiceIdNotFoundInRequest { .. } => 112,

            DuplicateNodeId(_) => 201,
            DuplicateRequestId(_) => 202,
            DuplicateServiceId(_) => 203,
            DuplicateServiceIdInDataRequest(_) => 204,
            DuplicateAccessorId(_) => 205,
            DuplicateAccessorGroupId(_) => 206,
            DuplicateNamespace(_) => 207,
            DuplicateResponse(_) => 208,
            DuplicateIdentityProof { .. } => 209,
            DuplicateAnsweredAsIdList(_) => 210,
            DuplicateAsInDataRequest(_) => 211,
            DuplicateIdentityRegistration { .. } => 212,

            RequestIsClosed(_) => 301,
            RequestIsTimedOut(_) => 302,
            RequestIsCompleted(_) => 303,
            RequestIsNotClosed(_) => 304,
            DataRequestIsCompleted(_) => 305,
            ServiceIsNotActive(_) => 306,
            ServiceDestinationIsNotActive { .. } => 307,
            NodeIsNotActive(_) => 308,
            AccessorIsRevoked(_) => 309,
            MsqDestinationIsTimedOut(_) => 310,
            NdidAlreadyInitialized => 311,

            IalError(_) => 401,
            AalError(_) => 402,
            NotFirstIdp(_) => 403,
            WrongIdentityProof(_) => 404,
            NotInIdpList(_) => 405,
            RequestIsNotCompleted { .. } => 406,
            InvalidMode(_) => 407,
            InvalidMinIdp(_) => 408,
            RequestIsNotSpecial(_) => 409,
            InvalidPurpose { .. } => 410,
            NotOwnerOfResponse { .. } => 411,
            NotOwnerOfAccessor { .. } => 412,
            NotRequestOwner { .. } => 413,
            NodeIdIsNotExistInAsList(_) => 414,
            AsIdIsNotExistInAnsweredAsList(_) => 415,
            WrongRole(_) => 416,
            NoPermissionForRegisterServiceDestination { .. } => 417,
            ServiceDestinationIsNotApproved { .. } => 418,
            TimeOutBlockIsMustGreaterThanZero => 419,
            TokenNotEnough { .. } => 420,
            NodeIsNotProxy(_) => 421,
            NodeIsProxy(_) => 422,
            NodeIsAlreadyBehindProxy(_) => 423,
            NodeIsNotBehindProxy(_) => 424,
            TokenBalanceOverflow { .. } => 425,
            TimeOutBlockIsTooLarge { .. } => 426,

            NotNdid(_) => 501,
            RoleNotAllowed { .. } => 502,
            UnknownCaller(_) => 503,

            UnknownMethod(_) => 601,
            UnmarshalError(_) => 602,

            MarshalError(_) => 701,
            Storage(_) => 702,
        }
    }
}

/// Serializable mirror of a [`LedgerError`] for logs and replay output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerErrorPayload {
    pub code: u32,
    pub category: ErrorCategory,
    pub message: String,
}

impl From<&LedgerError> for LedgerErrorPayload {
    fn from(err: &LedgerError) -> Self {
        Self {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
        }
    }
}
