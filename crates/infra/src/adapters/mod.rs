//! HTTP adapters implementing the `stockdesk-core` ports

pub mod locations;
pub mod resources;
pub mod stock;
mod wire;

pub use locations::HttpLocationDirectory;
pub use resources::HttpResourceFetcher;
pub use stock::HttpStockService;
