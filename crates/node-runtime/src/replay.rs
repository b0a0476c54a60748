//! # Transaction Log Replay
//!
//! Drives an [`IdentityLedgerApp`] from a JSON-lines log. Each line is one of:
//!
//! ```text
//! {"method": "RegisterNode", "caller": "ndid", "params": {...}}
//! {"query": "GetNodeInfo", "params": {...}, "height": 0}
//! {"commit": true}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. One JSON result line
//! is written per input line.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::Height;

use crate::app::IdentityLedgerApp;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReplayLine {
    Commit {
        commit: bool,
    },
    Query {
        query: String,
        #[serde(default)]
        params: Value,
        #[serde(default)]
        height: Height,
    },
    Transaction {
        method: String,
        caller: String,
        #[serde(default)]
        params: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayOutcome {
    Transaction {
        method: String,
        code: u32,
        log: String,
        data: String,
    },
    Query {
        method: String,
        log: String,
        height: Height,
        value: Value,
    },
    Commit {
        height: Height,
        app_hash: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: usize,
    pub queries: usize,
    pub blocks: usize,
}

/// `null` params are sent as empty bytes.
fn param_bytes(params: &Value) -> Result<Vec<u8>> {
    if params.is_null() {
        return Ok(Vec::new());
    }
    serde_json::to_vec(params).context("re-encoding params")
}

pub fn replay_line(app: &IdentityLedgerApp, line: ReplayLine) -> Result<Option<ReplayOutcome>> {
    let outcome = match line {
        ReplayLine::Commit { commit: false } => return Ok(None),
        ReplayLine::Commit { commit: true } => {
            let info = app.commit()?;
            ReplayOutcome::Commit {
                height: info.height,
                app_hash: hex::encode(info.app_hash),
            }
        }
        ReplayLine::Query {
            query,
            params,
            height,
        } => {
            let resp = app.query(&query, &param_bytes(&params)?, height);
            let value = serde_json::from_slice(&resp.value).unwrap_or(Value::Null);
            ReplayOutcome::Query {
                method: query,
                log: resp.log,
                height: resp.height,
                value,
            }
        }
        ReplayLine::Transaction {
            method,
            caller,
            params,
        } => {
            let resp = app.apply(&method, &param_bytes(&params)?, &caller);
            ReplayOutcome::Transaction {
                method,
                code: resp.code,
                log: resp.log,
                data: String::from_utf8_lossy(&resp.data).into_owned(),
            }
        }
    };
    Ok(Some(outcome))
}

/// Replay every line of `input`, writing one result line per entry to `out`.
pub fn run<R: BufRead, W: Write>(
    app: &IdentityLedgerApp,
    input: R,
    mut out: W,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    for (index, line) in input.lines().enumerate() {
        let number = index + 1;
        let line = line.with_context(|| format!("reading line {number}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let entry: ReplayLine = serde_json::from_str(trimmed)
            .with_context(|| format!("line {number} is not a replay entry"))?;
        let Some(outcome) =
            replay_line(app, entry).with_context(|| format!("replaying line {number}"))?
        else {
            continue;
        };

        match &outcome {
            ReplayOutcome::Transaction { code: 0, .. } => summary.applied += 1,
            ReplayOutcome::Transaction { .. } => summary.rejected += 1,
            ReplayOutcome::Query { .. } => summary.queries += 1,
            ReplayOutcome::Commit { .. } => summary.blocks += 1,
        }
        serde_json::to_writer(&mut out, &outcome)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(summary)
}
