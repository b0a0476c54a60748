//! Node, proxy, token and IdP discovery queries.

use il_01_state_store::{QueryContext, StateKey};
use il_02_registry::{NodeDetail, ProxyLink, TokenAccount};
use il_04_identity::MsqDestination;
use shared_types::{LedgerResult, MqAddress, Role};

use crate::domain::{
    BehindProxyNodeView, IdpNodeInfoView, IdpNodeView, IdpNodesInfoView, IdpNodesQuery,
    IdpNodesView, MasterPublicKeyView, NodeIdListView, NodeIdQuery, NodeInfoView,
    NodesBehindProxyView, ProxyNodeQuery, PublicKeyView, RoleQuery, TokenView,
};
use crate::service::answer::Answer;
use crate::service::proxy::resolve_reachability;

pub(crate) fn load_node(ctx: &QueryContext<'_>, node_id: &str) -> LedgerResult<Option<NodeDetail>> {
    ctx.get(&StateKey::node(node_id))
}

fn assurance(detail: &NodeDetail) -> (Option<f64>, Option<f64>) {
    if detail.role == Role::Idp {
        (Some(detail.max_ial), Some(detail.max_aal))
    } else {
        (None, None)
    }
}

pub fn get_node_public_key(ctx: &QueryContext<'_>, q: &NodeIdQuery) -> LedgerResult<Answer> {
    match load_node(ctx, &q.node_id)? {
        Some(detail) => Answer::success(&PublicKeyView {
            public_key: detail.public_key,
        }),
        None => Answer::not_found(&PublicKeyView {
            public_key: String::new(),
        }),
    }
}

pub fn get_node_master_public_key(ctx: &QueryContext<'_>, q: &NodeIdQuery) -> LedgerResult<Answer> {
    match load_node(ctx, &q.node_id)? {
        Some(detail) => Answer::success(&MasterPublicKeyView {
            master_public_key: detail.master_public_key,
        }),
        None => Answer::not_found(&MasterPublicKeyView {
            master_public_key: String::new(),
        }),
    }
}

pub fn get_node_info(ctx: &QueryContext<'_>, q: &NodeIdQuery) -> LedgerResult<Answer> {
    let Some(detail) = load_node(ctx, &q.node_id)? else {
        return Ok(Answer::not_found_empty());
    };
    let (mq, proxy) = resolve_reachability(ctx, &q.node_id, &detail)?.into_parts();
    let (max_ial, max_aal) = assurance(&detail);

    Answer::success(&NodeInfoView {
        public_key: detail.public_key,
        master_public_key: detail.master_public_key,
        node_name: detail.node_name,
        role: detail.role,
        active: detail.active,
        max_ial,
        max_aal,
        mq,
        proxy,
    })
}

/// Effective message-queue addresses, through the proxy when there is one.
pub fn get_mq_addresses(ctx: &QueryContext<'_>, q: &NodeIdQuery) -> LedgerResult<Answer> {
    let Some(detail) = load_node(ctx, &q.node_id)? else {
        return Answer::not_found(&Vec::<MqAddress>::new());
    };
    let reachability = resolve_reachability(ctx, &q.node_id, &detail)?;
    Answer::success(&reachability.effective_mq())
}

pub fn get_node_id_list(ctx: &QueryContext<'_>, q: &RoleQuery) -> LedgerResult<Answer> {
    let key = match &q.role {
        Some(role) => StateKey::NodeList(role.parse()?),
        None => StateKey::AllNodes,
    };
    let node_id_list: Vec<String> = ctx.get(&key)?.unwrap_or_default();
    Answer::success(&NodeIdListView { node_id_list })
}

pub fn get_nodes_behind_proxy_node(
    ctx: &QueryContext<'_>,
    q: &ProxyNodeQuery,
) -> LedgerResult<Answer> {
    if load_node(ctx, &q.proxy_node_id)?.is_none() {
        return Answer::not_found(&NodesBehindProxyView::default());
    }
    let ids: Vec<String> = ctx
        .get(&StateKey::BehindProxyNode(q.proxy_node_id.clone()))?
        .unwrap_or_default();

    let mut nodes = Vec::with_capacity(ids.len());
    for node_id in ids {
        let (Some(detail), Some(link)) = (
            load_node(ctx, &node_id)?,
            ctx.get::<ProxyLink>(&StateKey::Proxy(node_id.clone()))?,
        ) else {
            continue;
        };
        let (max_ial, max_aal) = assurance(&detail);
        nodes.push(BehindProxyNodeView {
            node_id,
            node_name: detail.node_name,
            role: detail.role,
            public_key: detail.public_key,
            master_public_key: detail.master_public_key,
            max_ial,
            max_aal,
            config: link.config,
        });
    }
    Answer::success(&NodesBehindProxyView { nodes })
}

pub fn get_node_token(ctx: &QueryContext<'_>, q: &NodeIdQuery) -> LedgerResult<Answer> {
    match ctx.get::<TokenAccount>(&StateKey::Token(q.node_id.clone()))? {
        Some(account) => Answer::success(&TokenView {
            amount: account.amount,
        }),
        None => Answer::not_found(&TokenView::default()),
    }
}

// =============================================================================
// IDP DISCOVERY
// =============================================================================

/// Active IdPs meeting the assurance minimums, in list order. `None` when a
/// hash is given and nobody has registered it.
fn idp_candidates(
    ctx: &QueryContext<'_>,
    q: &IdpNodesQuery,
) -> LedgerResult<Option<Vec<(String, NodeDetail)>>> {
    let ids: Vec<String> = match &q.hash_id {
        Some(hash_id) => {
            let Some(entries) =
                ctx.get::<Vec<MsqDestination>>(&StateKey::MsqDestination(hash_id.clone()))?
            else {
                return Ok(None);
            };
            entries
                .into_iter()
                .filter(|e| e.is_live_at(ctx.height()) && e.ial >= q.min_ial)
                .map(|e| e.node_id)
                .collect()
        }
        None => ctx.get(&StateKey::NodeList(Role::Idp))?.unwrap_or_default(),
    };

    let mut candidates = Vec::new();
    for node_id in ids {
        if !q.node_id_list.is_empty() && !q.node_id_list.contains(&node_id) {
            continue;
        }
        let Some(detail) = load_node(ctx, &node_id)? else {
            continue;
        };
        if detail.active
            && detail.role == Role::Idp
            && detail.max_ial >= q.min_ial
            && detail.max_aal >= q.min_aal
        {
            candidates.push((node_id, detail));
        }
    }
    Ok(Some(candidates))
}

pub fn get_idp_nodes(ctx: &QueryContext<'_>, q: &IdpNodesQuery) -> LedgerResult<Answer> {
    let Some(candidates) = idp_candidates(ctx, q)? else {
        return Answer::not_found(&IdpNodesView::default());
    };
    let node = candidates
        .into_iter()
        .map(|(node_id, detail)| IdpNodeView {
            node_id,
            name: detail.node_name,
            max_ial: detail.max_ial,
            max_aal: detail.max_aal,
        })
        .collect();
    Answer::success(&IdpNodesView { node })
}

pub fn get_idp_nodes_info(ctx: &QueryContext<'_>, q: &IdpNodesQuery) -> LedgerResult<Answer> {
    let Some(candidates) = idp_candidates(ctx, q)? else {
        return Answer::not_found(&IdpNodesInfoView::default());
    };
    let mut node = Vec::with_capacity(candidates.len());
    for (node_id, detail) in candidates {
        let (mq, proxy) = resolve_reachability(ctx, &node_id, &detail)?.into_parts();
        node.push(IdpNodeInfoView {
            node_id,
            name: detail.node_name,
            max_ial: detail.max_ial,
            max_aal: detail.max_aal,
            public_key: detail.public_key,
            mq,
            proxy,
        });
    }
    Answer::success(&IdpNodesInfoView { node })
}
