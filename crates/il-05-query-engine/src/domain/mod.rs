pub mod queries;
pub mod views;

pub use queries::*;
pub use views::*;
