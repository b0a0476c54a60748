use il_01_state_store::{QueryContext, StateStore};
use shared_types::{Height, LedgerResult, QueryResponse};
use tracing::debug;

use crate::domain::Query;
use crate::service::answer::Answer;
use crate::service::{directory, identity, nodes, requests};

/// Evaluate `query` against a pinned snapshot.
pub fn execute(ctx: &QueryContext<'_>, query: &Query) -> LedgerResult<Answer> {
    match query {
        Query::GetNodePublicKey(q) => nodes::get_node_public_key(ctx, q),
        Query::GetNodeMasterPublicKey(q) => nodes::get_node_master_public_key(ctx, q),
        Query::GetNodeInfo(q) => nodes::get_node_info(ctx, q),
        Query::GetMqAddresses(q) => nodes::get_mq_addresses(ctx, q),
        Query::GetNodeIdList(q) => nodes::get_node_id_list(ctx, q),
        Query::GetNodesBehindProxyNode(q) => nodes::get_nodes_behind_proxy_node(ctx, q),
        Query::GetNodeToken(q) => nodes::get_node_token(ctx, q),
        Query::GetIdpNodes(q) => nodes::get_idp_nodes(ctx, q),
        Query::GetIdpNodesInfo(q) => nodes::get_idp_nodes_info(ctx, q),

        Query::GetNamespaceList => directory::get_namespace_list(ctx),
        Query::GetServiceDetail(q) => directory::get_service_detail(ctx, q),
        Query::GetServiceList => directory::get_service_list(ctx),
        Query::GetAsNodesByServiceId(q) => directory::get_as_nodes_by_service_id(ctx, q),
        Query::GetAsNodesInfoByServiceId(q) => directory::get_as_nodes_info_by_service_id(ctx, q),
        Query::GetServicesByAsId(q) => directory::get_services_by_as_id(ctx, q),

        Query::GetIdentityInfo(q) => identity::get_identity_info(ctx, q),
        Query::CheckExistingIdentity(q) => identity::check_existing_identity(ctx, q),
        Query::GetAccessorGroupId(q) => identity::get_accessor_group_id(ctx, q),
        Query::GetAccessorKey(q) => identity::get_accessor_key(ctx, q),
        Query::CheckExistingAccessorId(q) => identity::check_existing_accessor_id(ctx, q),
        Query::CheckExistingAccessorGroupId(q) => identity::check_existing_accessor_group_id(ctx, q),
        Query::GetAccessorsInGroup(q) => identity::get_accessors_in_group(ctx, q),

        Query::GetRequest(q) => requests::get_request(ctx, q),
        Query::GetRequestDetail(q) => requests::get_request_detail(ctx, q),
        Query::GetDataSignature(q) => requests::get_data_signature(ctx, q),
        Query::GetIdentityProof(q) => requests::get_identity_proof(ctx, q),
    }
}

/// Query boundary: method name and JSON parameters in, result envelope out.
/// `height == 0` reads the latest committed block. Failures never escape as
/// errors; they come back as a literal message in `log`.
pub fn run_query(store: &StateStore, method: &str, params: &[u8], height: Height) -> QueryResponse {
    let result = store.snapshot(height).and_then(|ctx| {
        let query = Query::decode(method, params)?;
        let answer = execute(&ctx, &query)?;
        Ok((answer, ctx.height()))
    });

    match result {
        Ok((answer, pinned)) => {
            debug!(method, height = pinned, status = answer.status.as_str(), "[il-05] query answered");
            QueryResponse::new(answer.value, answer.status, pinned)
        }
        Err(err) => {
            debug!(method, height, error = %err, "[il-05] query failed");
            QueryResponse::error(err.to_string(), store.latest_height())
        }
    }
}
