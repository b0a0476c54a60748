use il_01_state_store::{QueryContext, StateKey};
use il_02_registry::{NodeDetail, ProxyLink};
use shared_types::{LedgerError, LedgerResult, MqAddress};

use crate::domain::ProxyView;

/// How other nodes reach a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    Direct(Vec<MqAddress>),
    ViaProxy(ProxyView),
}

impl Reachability {
    /// Addresses traffic for the node actually goes to.
    pub fn effective_mq(&self) -> &[MqAddress] {
        match self {
            Reachability::Direct(mq) => mq,
            Reachability::ViaProxy(proxy) => &proxy.mq,
        }
    }

    /// `(mq, proxy)` with exactly one side present.
    pub fn into_parts(self) -> (Option<Vec<MqAddress>>, Option<ProxyView>) {
        match self {
            Reachability::Direct(mq) => (Some(mq), None),
            Reachability::ViaProxy(proxy) => (None, Some(proxy)),
        }
    }
}

/// Resolve `node_id` (whose own record is `detail`) through its proxy link.
pub fn resolve_reachability(
    ctx: &QueryContext<'_>,
    node_id: &str,
    detail: &NodeDetail,
) -> LedgerResult<Reachability> {
    let Some(link) = ctx.get::<ProxyLink>(&StateKey::Proxy(node_id.to_string()))? else {
        return Ok(Reachability::Direct(detail.mq.clone()));
    };
    let proxy: NodeDetail = ctx
        .get(&StateKey::node(&link.proxy_node_id))?
        .ok_or_else(|| LedgerError::ProxyNodeNotFound(link.proxy_node_id.clone()))?;

    Ok(Reachability::ViaProxy(ProxyView {
        node_id: link.proxy_node_id,
        node_name: proxy.node_name,
        public_key: proxy.public_key,
        master_public_key: proxy.master_public_key,
        mq: proxy.mq,
        config: link.config,
    }))
}
