//! Integration flows over the full transaction and query boundary.

#[cfg(test)]
pub(crate) mod harness;

pub mod directory;
pub mod onboarding;
pub mod properties;
pub mod scenarios;
