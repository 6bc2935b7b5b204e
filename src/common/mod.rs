pub mod jupiter_api;
pub mod types;

pub use jupiter_api::*;
pub use types::*;
