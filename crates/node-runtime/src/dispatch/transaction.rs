//! Closed set of ledger transactions, decoded from a method name and JSON
//! parameters.

use il_02_registry::{
    AddNodeToProxyNodeParams, InitNdidParams, NamespaceParams, NodeIdParams, RegisterNodeParams,
    ServiceApprovalParams, ServiceDestinationParams, ServiceIdParams, ServiceParams,
    SetMqAddressesParams, TimeOutBlockParams, TokenParams, UpdateNodeByNdidParams,
    UpdateNodeParams, UpdateNodeProxyNodeParams,
};
use il_03_request_protocol::{
    CreateIdpResponseParams, CreateRequestParams, DeclareIdentityProofParams,
    FinishRequestParams, SetDataReceivedParams, SignDataParams,
};
use il_04_identity::{
    AddAccessorMethodParams, CreateIdentityParams, HashIdParams, RegisterIdentityParams,
    RevokeAccessorMethodParams, UpdateIdentityParams,
};
use serde::de::DeserializeOwned;
use shared_types::{LedgerError, LedgerResult, Role};

/// Who may submit a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodGate {
    /// Only while no NDID exists yet.
    Bootstrap,
    /// Only the master NDID node.
    Ndid,
    /// Any registered, active node. Ownership is checked by the handler.
    AnyNode,
    /// Registered, active nodes of these roles.
    Roles(&'static [Role]),
}

const IDP: &[Role] = &[Role::Idp];
const AS: &[Role] = &[Role::As];
const REQUESTERS: &[Role] = &[Role::Rp, Role::Idp];

#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    // NDID
    InitNdid(InitNdidParams),
    RegisterNode(RegisterNodeParams),
    UpdateNodeByNdid(UpdateNodeByNdidParams),
    DisableNode(NodeIdParams),
    EnableNode(NodeIdParams),
    AddNodeToProxyNode(AddNodeToProxyNodeParams),
    UpdateNodeProxyNode(UpdateNodeProxyNodeParams),
    RemoveNodeFromProxyNode(NodeIdParams),
    AddNamespace(NamespaceParams),
    DisableNamespace(NamespaceParams),
    EnableNamespace(NamespaceParams),
    AddService(ServiceParams),
    UpdateService(ServiceParams),
    DisableService(ServiceIdParams),
    EnableService(ServiceIdParams),
    RegisterServiceDestinationByNdid(ServiceApprovalParams),
    DisableServiceDestinationByNdid(ServiceApprovalParams),
    EnableServiceDestinationByNdid(ServiceApprovalParams),
    SetTimeOutBlockRegisterIdentity(TimeOutBlockParams),
    AddNodeToken(TokenParams),
    ReduceNodeToken(TokenParams),
    SetNodeToken(TokenParams),

    // Any node
    UpdateNode(UpdateNodeParams),
    SetMqAddresses(SetMqAddressesParams),

    // IdP
    RegisterIdentity(RegisterIdentityParams),
    UpdateIdentity(UpdateIdentityParams),
    ClearRegisterIdentityTimeout(HashIdParams),
    CreateIdentity(CreateIdentityParams),
    AddAccessorMethod(AddAccessorMethodParams),
    RevokeAccessorMethod(RevokeAccessorMethodParams),
    CreateIdpResponse(CreateIdpResponseParams),
    DeclareIdentityProof(DeclareIdentityProofParams),

    // AS
    RegisterServiceDestination(ServiceDestinationParams),
    UpdateServiceDestination(ServiceDestinationParams),
    DisableServiceDestination(ServiceIdParams),
    EnableServiceDestination(ServiceIdParams),
    SignData(SignDataParams),

    // Requests
    CreateRequest(CreateRequestParams),
    SetDataReceived(SetDataReceivedParams),
    CloseRequest(FinishRequestParams),
    TimeOutRequest(FinishRequestParams),
}

fn params<T: DeserializeOwned>(bytes: &[u8]) -> LedgerResult<T> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::UnmarshalError(e.to_string()))
}

impl Transaction {
    /// Decode `bytes` as the parameter record of `method`. The older
    /// `*MsqDestination` / `RegisterMsqAddress` names are accepted as aliases.
    pub fn decode(method: &str, bytes: &[u8]) -> LedgerResult<Self> {
        use Transaction::*;

        let tx = match method {
            "InitNDID" => InitNdid(params(bytes)?),
            "RegisterNode" => RegisterNode(params(bytes)?),
            "UpdateNodeByNDID" => UpdateNodeByNdid(params(bytes)?),
            "DisableNode" => DisableNode(params(bytes)?),
            "EnableNode" => EnableNode(params(bytes)?),
            "AddNodeToProxyNode" => AddNodeToProxyNode(params(bytes)?),
            "UpdateNodeProxyNode" => UpdateNodeProxyNode(params(bytes)?),
            "RemoveNodeFromProxyNode" => RemoveNodeFromProxyNode(params(bytes)?),
            "AddNamespace" => AddNamespace(params(bytes)?),
            "DisableNamespace" => DisableNamespace(params(bytes)?),
            "EnableNamespace" => EnableNamespace(params(bytes)?),
            "AddService" => AddService(params(bytes)?),
            "UpdateService" => UpdateService(params(bytes)?),
            "DisableService" => DisableService(params(bytes)?),
            "EnableService" => EnableService(params(bytes)?),
            "RegisterServiceDestinationByNDID" => RegisterServiceDestinationByNdid(params(bytes)?),
            "DisableServiceDestinationByNDID" => DisableServiceDestinationByNdid(params(bytes)?),
            "EnableServiceDestinationByNDID" => EnableServiceDestinationByNdid(params(bytes)?),
            "SetTimeOutBlockRegisterIdentity" | "SetTimeOutBlockRegisterMsqDestination" => {
                SetTimeOutBlockRegisterIdentity(params(bytes)?)
            }
            "AddNodeToken" => AddNodeToken(params(bytes)?),
            "ReduceNodeToken" => ReduceNodeToken(params(bytes)?),
            "SetNodeToken" => SetNodeToken(params(bytes)?),

            "UpdateNode" => UpdateNode(params(bytes)?),
            "SetMqAddresses" | "RegisterMsqAddress" => SetMqAddresses(params(bytes)?),

            "RegisterIdentity" | "RegisterMsqDestination" => RegisterIdentity(params(bytes)?),
            "UpdateIdentity" => UpdateIdentity(params(bytes)?),
            "ClearRegisterIdentityTimeout" | "ClearRegisterMsqDestinationTimeout" => {
                ClearRegisterIdentityTimeout(params(bytes)?)
            }
            "CreateIdentity" | "RegisterAccessor" => CreateIdentity(params(bytes)?),
            "AddAccessorMethod" => AddAccessorMethod(params(bytes)?),
            "RevokeAccessorMethod" => RevokeAccessorMethod(params(bytes)?),
            "CreateIdpResponse" => CreateIdpResponse(params(bytes)?),
            "DeclareIdentityProof" => DeclareIdentityProof(params(bytes)?),

            "RegisterServiceDestination" => RegisterServiceDestination(params(bytes)?),
            "UpdateServiceDestination" => UpdateServiceDestination(params(bytes)?),
            "DisableServiceDestination" => DisableServiceDestination(params(bytes)?),
            "EnableServiceDestination" => EnableServiceDestination(params(bytes)?),
            "SignData" => SignData(params(bytes)?),

            "CreateRequest" => CreateRequest(params(bytes)?),
            "SetDataReceived" => SetDataReceived(params(bytes)?),
            "CloseRequest" => CloseRequest(params(bytes)?),
            "TimeOutRequest" => TimeOutRequest(params(bytes)?),

            other => return Err(LedgerError::UnknownMethod(other.to_string())),
        };
        Ok(tx)
    }

    /// Canonical method name.
    pub fn method(&self) -> &'static str {
        use Transaction::*;

        match self {
            InitNdid(_) => "InitNDID",
            RegisterNode(_) => "RegisterNode",
            UpdateNodeByNdid(_) => "UpdateNodeByNDID",
            DisableNode(_) => "DisableNode",
            EnableNode(_) => "EnableNode",
            AddNodeToProxyNode(_) => "AddNodeToProxyNode",
            UpdateNodeProxyNode(_) => "UpdateNodeProxyNode",
            RemoveNodeFromProxyNode(_) => "RemoveNodeFromProxyNode",
            AddNamespace(_) => "AddNamespace",
            DisableNamespace(_) => "DisableNamespace",
            EnableNamespace(_) => "EnableNamespace",
            AddService(_) => "AddService",
            UpdateService(_) => "UpdateService",
            DisableService(_) => "DisableService",
            EnableService(_) => "EnableService",
            RegisterServiceDestinationByNdid(_) => "RegisterServiceDestinationByNDID",
            DisableServiceDestinationByNdid(_) => "DisableServiceDestinationByNDID",
            EnableServiceDestinationByNdid(_) => "EnableServiceDestinationByNDID",
            SetTimeOutBlockRegisterIdentity(_) => "SetTimeOutBlockRegisterIdentity",
            AddNodeToken(_) => "AddNodeToken",
            ReduceNodeToken(_) => "ReduceNodeToken",
            SetNodeToken(_) => "SetNodeToken",
            UpdateNode(_) => "UpdateNode",
            SetMqAddresses(_) => "SetMqAddresses",
            RegisterIdentity(_) => "RegisterIdentity",
            UpdateIdentity(_) => "UpdateIdentity",
            ClearRegisterIdentityTimeout(_) => "ClearRegisterIdentityTimeout",
            CreateIdentity(_) => "CreateIdentity",
            AddAccessorMethod(_) => "AddAccessorMethod",
            RevokeAccessorMethod(_) => "RevokeAccessorMethod",
            CreateIdpResponse(_) => "CreateIdpResponse",
            DeclareIdentityProof(_) => "DeclareIdentityProof",
            RegisterServiceDestination(_) => "RegisterServiceDestination",
            UpdateServiceDestination(_) => "UpdateServiceDestination",
            DisableServiceDestination(_) => "DisableServiceDestination",
            EnableServiceDestination(_) => "EnableServiceDestination",
            SignData(_) => "SignData",
            CreateRequest(_) => "CreateRequest",
            SetDataReceived(_) => "SetDataReceived",
            CloseRequest(_) => "CloseRequest",
            TimeOutRequest(_) => "TimeOutRequest",
        }
    }

    pub fn gate(&self) -> MethodGate {
        use Transaction::*;

        match self {
            InitNdid(_) => MethodGate::Bootstrap,

            RegisterNode(_)
            | UpdateNodeByNdid(_)
            | DisableNode(_)
            | EnableNode(_)
            | AddNodeToProxyNode(_)
            | UpdateNodeProxyNode(_)
            | RemoveNodeFromProxyNode(_)
            | AddNamespace(_)
            | DisableNamespace(_)
            | EnableNamespace(_)
            | AddService(_)
            | UpdateService(_)
            | DisableService(_)
            | EnableService(_)
            | RegisterServiceDestinationByNdid(_)
            | DisableServiceDestinationByNdid(_)
            | EnableServiceDestinationByNdid(_)
            | SetTimeOutBlockRegisterIdentity(_)
            | AddNodeToken(_)
            | ReduceNodeToken(_)
            | SetNodeToken(_) => MethodGate::Ndid,

            UpdateNode(_)
            | SetMqAddresses(_)
            | SetDataReceived(_)
            | CloseRequest(_)
            | TimeOutRequest(_) => MethodGate::AnyNode,

            RegisterIdentity(_)
            | UpdateIdentity(_)
            | ClearRegisterIdentityTimeout(_)
            | CreateIdentity(_)
            | AddAccessorMethod(_)
            | RevokeAccessorMethod(_)
            | CreateIdpResponse(_)
            | DeclareIdentityProof(_) => MethodGate::Roles(IDP),

            RegisterServiceDestination(_)
            | UpdateServiceDestination(_)
            | DisableServiceDestination(_)
            | EnableServiceDestination(_)
            | SignData(_) => MethodGate::Roles(AS),

            CreateRequest(_) => MethodGate::Roles(REQUESTERS),
        }
    }
}
