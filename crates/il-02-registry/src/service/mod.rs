//! Registry transaction handlers.

pub mod lookups;
pub mod namespaces;
pub mod nodes;
pub mod parameters;
pub mod proxy;
pub mod services;
pub mod tokens;

pub use lookups::*;
pub use namespaces::*;
pub use nodes::*;
pub use parameters::*;
pub use proxy::*;
pub use services::*;
pub use tokens::*;
