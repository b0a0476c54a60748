//! Routes a decoded [`Transaction`] to its subsystem handler.

use il_01_state_store::TxContext;
use il_02_registry as registry;
use il_03_request_protocol as requests;
use il_04_identity as identity;
use shared_types::LedgerResult;

use super::transaction::Transaction;

/// Run the handler for `tx`. Returns the transaction's result data: the
/// request id for `CreateRequest`, empty otherwise.
pub fn execute(
    ctx: &mut TxContext<'_>,
    tx: Transaction,
    default_lease_blocks: u64,
) -> LedgerResult<Vec<u8>> {
    use Transaction::*;

    let outcome = match tx {
        InitNdid(p) => registry::init_ndid(ctx, p),
        RegisterNode(p) => registry::register_node(ctx, p),
        UpdateNodeByNdid(p) => registry::update_node_by_ndid(ctx, p),
        DisableNode(p) => registry::disable_node(ctx, p),
        EnableNode(p) => registry::enable_node(ctx, p),
        AddNodeToProxyNode(p) => registry::add_node_to_proxy_node(ctx, p),
        UpdateNodeProxyNode(p) => registry::update_node_proxy_node(ctx, p),
        RemoveNodeFromProxyNode(p) => registry::remove_node_from_proxy_node(ctx, p),
        AddNamespace(p) => registry::add_namespace(ctx, p),
        DisableNamespace(p) => registry::disable_namespace(ctx, p),
        EnableNamespace(p) => registry::enable_namespace(ctx, p),
        AddService(p) => registry::add_service(ctx, p),
        UpdateService(p) => registry::update_service(ctx, p),
        DisableService(p) => registry::disable_service(ctx, p),
        EnableService(p) => registry::enable_service(ctx, p),
        RegisterServiceDestinationByNdid(p) => registry::register_service_destination_by_ndid(ctx, p),
        DisableServiceDestinationByNdid(p) => registry::disable_service_destination_by_ndid(ctx, p),
        EnableServiceDestinationByNdid(p) => registry::enable_service_destination_by_ndid(ctx, p),
        SetTimeOutBlockRegisterIdentity(p) => registry::set_timeout_block_register_identity(ctx, p),
        AddNodeToken(p) => registry::add_node_token(ctx, p),
        ReduceNodeToken(p) => registry::reduce_node_token(ctx, p),
        SetNodeToken(p) => registry::set_node_token(ctx, p),
        UpdateNode(p) => registry::update_node(ctx, p),
        SetMqAddresses(p) => registry::set_mq_addresses(ctx, p),
        RegisterServiceDestination(p) => registry::register_service_destination(ctx, p),
        UpdateServiceDestination(p) => registry::update_service_destination(ctx, p),
        DisableServiceDestination(p) => registry::disable_service_destination(ctx, p),
        EnableServiceDestination(p) => registry::enable_service_destination(ctx, p),

        RegisterIdentity(p) => identity::register_identity(ctx, p, default_lease_blocks),
        UpdateIdentity(p) => identity::update_identity(ctx, p),
        ClearRegisterIdentityTimeout(p) => identity::clear_register_identity_timeout(ctx, p),
        CreateIdentity(p) => identity::create_identity(ctx, p),
        AddAccessorMethod(p) => identity::add_accessor_method(ctx, p),
        RevokeAccessorMethod(p) => identity::revoke_accessor_method(ctx, p),

        CreateRequest(p) => return requests::create_request(ctx, p).map(String::into_bytes),
        CreateIdpResponse(p) => requests::create_idp_response(ctx, p),
        DeclareIdentityProof(p) => requests::declare_identity_proof(ctx, p),
        SignData(p) => requests::sign_data(ctx, p),
        SetDataReceived(p) => requests::set_data_received(ctx, p),
        CloseRequest(p) => requests::close_request(ctx, p),
        TimeOutRequest(p) => requests::timeout_request(ctx, p),
    };
    outcome.map(|()| Vec::new())
}
