//! # Identity Ledger Application
//!
//! The boundary the consensus engine drives. Transactions are applied one at
//! a time in ledger order; each is all-or-nothing. `commit` closes the block
//! and advances the height. Queries read a committed snapshot and never see
//! the block being built.

use il_01_state_store::{AppHash, CommitInfo, StateStore};
use il_05_query_engine::run_query;
use shared_types::{Height, LedgerResult, QueryResponse, TxResponse};
use tracing::{debug, info};

use crate::container::{open_store, AppConfig, LedgerConfig};
use crate::dispatch::{authorize, execute, Transaction};

/// Last committed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerInfo {
    pub last_height: Height,
    pub app_hash: AppHash,
}

pub struct IdentityLedgerApp {
    store: StateStore,
    config: LedgerConfig,
}

impl IdentityLedgerApp {
    pub fn new(store: StateStore, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Open the configured store.
    pub fn from_config(config: &AppConfig) -> LedgerResult<Self> {
        let store = open_store(config)?;
        info!(
            height = store.latest_height(),
            lease_blocks = config.ledger.default_register_identity_timeout,
            "[runtime] ledger opened"
        );
        Ok(Self::new(store, config.ledger.clone()))
    }

    /// Fresh in-memory ledger with default rules.
    pub fn in_memory() -> Self {
        let config = LedgerConfig::default();
        Self::new(StateStore::in_memory(config.key_prefix.clone()), config)
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Apply one transaction. A rejected transaction leaves no trace in state.
    pub fn apply(&self, method: &str, params: &[u8], caller: &str) -> TxResponse {
        match self.try_apply(method, params, caller) {
            Ok(data) => {
                debug!(method, caller, "[runtime] transaction applied");
                TxResponse::ok(data)
            }
            Err(err) => {
                debug!(method, caller, code = err.code(), error = %err, "[runtime] transaction rejected");
                TxResponse::from(&err)
            }
        }
    }

    fn try_apply(&self, method: &str, params: &[u8], caller: &str) -> LedgerResult<Vec<u8>> {
        let tx = Transaction::decode(method, params)?;
        let mut ctx = self.store.begin(caller);
        authorize(&ctx, &tx)?;
        let data = execute(&mut ctx, tx, self.config.default_register_identity_timeout)?;
        self.store.apply(ctx)?;
        Ok(data)
    }

    /// Evaluate a read-only query at `height` (`0` = latest committed).
    pub fn query(&self, method: &str, params: &[u8], height: Height) -> QueryResponse {
        run_query(&self.store, method, params, height)
    }

    /// Close the current block.
    pub fn commit(&self) -> LedgerResult<CommitInfo> {
        self.store.commit()
    }

    pub fn info(&self) -> LedgerInfo {
        LedgerInfo {
            last_height: self.store.latest_height(),
            app_hash: self.store.app_hash(),
        }
    }
}
