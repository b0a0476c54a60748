//! # Identity Ledger Node Runtime
//!
//! Replays a JSON-lines transaction log against the ledger state machine and
//! prints one result line per entry.
//!
//! ```text
//! node-runtime [--config <ledger.json>] [<log.jsonl> | -]
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, file, `IL_*` environment)
//! 2. Install logging (`RUST_LOG`, falling back to `logging.level`)
//! 3. Open the store
//! 4. Replay the log from the file or stdin

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::replay;
use node_runtime::{AppConfig, IdentityLedgerApp};

struct Args {
    config: Option<PathBuf>,
    input: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        input: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "-" => args.input = None,
            flag if flag.starts_with('-') => bail!("unknown flag {flag}"),
            path => args.input = Some(PathBuf::from(path)),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = IdentityLedgerApp::from_config(&config).context("opening ledger store")?;

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let summary = replay::run(&app, input, io::stdout().lock())?;
    let head = app.info();
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        queries = summary.queries,
        blocks = summary.blocks,
        height = head.last_height,
        app_hash = %hex::encode(head.app_hash),
        "[runtime] replay finished"
    );
    Ok(())
}
