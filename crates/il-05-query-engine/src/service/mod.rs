//! Query handlers over a height-pinned snapshot.

pub mod answer;
pub mod directory;
pub mod engine;
pub mod identity;
pub mod nodes;
pub mod proxy;
pub mod requests;

pub use answer::Answer;
pub use engine::{execute, run_query};
pub use proxy::{resolve_reachability, Reachability};
