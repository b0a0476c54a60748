//! Token accounts. Created with the node; only NDID moves balances.

use il_01_state_store::{StateKey, TxContext};
use shared_types::{LedgerError, LedgerResult};
use tracing::debug;

use crate::domain::{TokenAccount, TokenParams};

pub fn load_token_account(ctx: &TxContext<'_>, node_id: &str) -> LedgerResult<TokenAccount> {
    ctx.get(&StateKey::Token(node_id.to_string()))?
        .ok_or_else(|| LedgerError::TokenAccountNotFound(node_id.to_string()))
}

fn store_balance(ctx: &mut TxContext<'_>, node_id: &str, amount: u64) -> LedgerResult<()> {
    debug!(node_id, amount, "[il-02] token balance set");
    ctx.put(&StateKey::Token(node_id.to_string()), &TokenAccount { amount })
}

pub fn set_node_token(ctx: &mut TxContext<'_>, params: TokenParams) -> LedgerResult<()> {
    load_token_account(ctx, &params.node_id)?;
    store_balance(ctx, &params.node_id, params.amount)
}

pub fn add_node_token(ctx: &mut TxContext<'_>, params: TokenParams) -> LedgerResult<()> {
    let account = load_token_account(ctx, &params.node_id)?;
    let total = account
        .amount
        .checked_add(params.amount)
        .ok_or(LedgerError::TokenBalanceOverflow {
            balance: account.amount,
            requested: params.amount,
        })?;
    store_balance(ctx, &params.node_id, total)
}

pub fn reduce_node_token(ctx: &mut TxContext<'_>, params: TokenParams) -> LedgerResult<()> {
    let account = load_token_account(ctx, &params.node_id)?;
    let remaining = account
        .amount
        .checked_sub(params.amount)
        .ok_or(LedgerError::TokenNotEnough {
            balance: account.amount,
            requested: params.amount,
        })?;
    store_balance(ctx, &params.node_id, remaining)
}
