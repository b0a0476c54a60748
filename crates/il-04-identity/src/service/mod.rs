//! Identity transaction handlers.

pub mod accessors;
pub mod msq;

pub use accessors::*;
pub use msq::*;
