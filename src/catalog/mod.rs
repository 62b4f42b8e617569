mod client;
mod types;

pub use client::CatalogClient;
pub use types::*;
