//! Request protocol transaction handlers.

pub mod data;
pub mod lifecycle;
pub mod lookups;
pub mod responses;

pub use data::*;
pub use lifecycle::*;
pub use lookups::*;
pub use responses::*;

#[cfg(test)]
mod tests;
