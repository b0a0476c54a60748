//! Namespace, service and AS directory queries.

use il_01_state_store::{QueryContext, StateKey};
use il_02_registry::{Approval, Namespace, NodeDetail, ServiceDestination, ServiceDetail};
use shared_types::LedgerResult;

use crate::domain::{
    AsIdQuery, AsNodeInfoView, AsNodeView, AsNodesInfoView, AsNodesView, NamespaceListView,
    ProvidedServiceView, ServiceIdQuery, ServiceListView, ServicesByAsView,
};
use crate::service::answer::Answer;
use crate::service::nodes::load_node;
use crate::service::proxy::resolve_reachability;

fn load_service(ctx: &QueryContext<'_>, service_id: &str) -> LedgerResult<Option<ServiceDetail>> {
    ctx.get(&StateKey::Service(service_id.to_string()))
}

fn load_approval(
    ctx: &QueryContext<'_>,
    service_id: &str,
    node_id: &str,
) -> LedgerResult<Option<Approval>> {
    ctx.get(&StateKey::approve(service_id, node_id))
}

fn destinations(ctx: &QueryContext<'_>, service_id: &str) -> LedgerResult<Vec<ServiceDestination>> {
    Ok(ctx
        .get(&StateKey::ServiceDestination(service_id.to_string()))?
        .unwrap_or_default())
}

pub fn get_namespace_list(ctx: &QueryContext<'_>) -> LedgerResult<Answer> {
    let all: Vec<Namespace> = ctx.get(&StateKey::AllNamespace)?.unwrap_or_default();
    Answer::success(&NamespaceListView(
        all.into_iter().filter(|ns| ns.active).collect(),
    ))
}

pub fn get_service_detail(ctx: &QueryContext<'_>, q: &ServiceIdQuery) -> LedgerResult<Answer> {
    match load_service(ctx, &q.service_id)? {
        Some(service) => Answer::success(&service),
        None => Ok(Answer::not_found_empty()),
    }
}

pub fn get_service_list(ctx: &QueryContext<'_>) -> LedgerResult<Answer> {
    let all: Vec<ServiceDetail> = ctx.get(&StateKey::AllService)?.unwrap_or_default();
    Answer::success(&ServiceListView(
        all.into_iter().filter(|s| s.active).collect(),
    ))
}

/// Outcome of looking up the ASes serving a service.
enum Serving {
    Missing,
    Inactive,
    By(Vec<(ServiceDestination, NodeDetail)>),
}

/// Active destinations with an active approval and an active node.
fn serving_nodes(ctx: &QueryContext<'_>, service_id: &str) -> LedgerResult<Serving> {
    let Some(service) = load_service(ctx, service_id)? else {
        return Ok(Serving::Missing);
    };
    if !service.active {
        return Ok(Serving::Inactive);
    }

    let mut serving = Vec::new();
    for destination in destinations(ctx, service_id)? {
        if !destination.active {
            continue;
        }
        if !load_approval(ctx, service_id, &destination.node_id)?.is_some_and(|a| a.active) {
            continue;
        }
        let Some(detail) = load_node(ctx, &destination.node_id)? else {
            continue;
        };
        if detail.active {
            serving.push((destination, detail));
        }
    }
    Ok(Serving::By(serving))
}

pub fn get_as_nodes_by_service_id(
    ctx: &QueryContext<'_>,
    q: &ServiceIdQuery,
) -> LedgerResult<Answer> {
    let serving = match serving_nodes(ctx, &q.service_id)? {
        Serving::Missing => return Answer::not_found(&AsNodesView::default()),
        Serving::Inactive => return Answer::service_inactive(&AsNodesView::default()),
        Serving::By(serving) => serving,
    };
    let node = serving
        .into_iter()
        .map(|(destination, detail)| AsNodeView {
            node_id: destination.node_id,
            name: detail.node_name,
            min_ial: destination.min_ial,
            min_aal: destination.min_aal,
        })
        .collect();
    Answer::success(&AsNodesView { node })
}

pub fn get_as_nodes_info_by_service_id(
    ctx: &QueryContext<'_>,
    q: &ServiceIdQuery,
) -> LedgerResult<Answer> {
    let serving = match serving_nodes(ctx, &q.service_id)? {
        Serving::Missing => return Answer::not_found(&AsNodesInfoView::default()),
        Serving::Inactive => return Answer::service_inactive(&AsNodesInfoView::default()),
        Serving::By(serving) => serving,
    };
    let mut node = Vec::with_capacity(serving.len());
    for (destination, detail) in serving {
        let (mq, proxy) = resolve_reachability(ctx, &destination.node_id, &detail)?.into_parts();
        node.push(AsNodeInfoView {
            node_id: destination.node_id,
            name: detail.node_name,
            min_ial: destination.min_ial,
            min_aal: destination.min_aal,
            public_key: detail.public_key,
            mq,
            proxy,
        });
    }
    Answer::success(&AsNodesInfoView { node })
}

/// Services an AS has registered for. Disabled services are left out;
/// a withdrawn NDID approval shows as `suspended`. A disabled AS answers
/// an empty list with a "node is not active" status.
pub fn get_services_by_as_id(ctx: &QueryContext<'_>, q: &AsIdQuery) -> LedgerResult<Answer> {
    let Some(detail) = load_node(ctx, &q.as_id)? else {
        return Answer::not_found(&ServicesByAsView::default());
    };
    if !detail.active {
        return Answer::node_inactive(&ServicesByAsView::default());
    }

    let provided: Vec<String> = ctx
        .get(&StateKey::ProvideService(q.as_id.clone()))?
        .unwrap_or_default();
    let mut services = Vec::with_capacity(provided.len());
    for service_id in provided {
        if !load_service(ctx, &service_id)?.is_some_and(|s| s.active) {
            continue;
        }
        let Some(destination) = destinations(ctx, &service_id)?
            .into_iter()
            .find(|d| d.node_id == q.as_id)
        else {
            continue;
        };
        let suspended = !load_approval(ctx, &service_id, &q.as_id)?.is_some_and(|a| a.active);
        services.push(ProvidedServiceView {
            service_id,
            min_ial: destination.min_ial,
            min_aal: destination.min_aal,
            active: destination.active,
            suspended,
        });
    }
    Answer::success(&ServicesByAsView { services })
}
