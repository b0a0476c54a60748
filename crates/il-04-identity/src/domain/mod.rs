pub mod entities;
pub mod params;

pub use entities::*;
pub use params::*;
