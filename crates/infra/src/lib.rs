//! # StockDesk Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client and REST API client
//! - Adapters implementing the `stockdesk-core` ports over the REST backend
//! - Configuration loading
//! - Tracing initialisation
//!
//! ## Architecture
//! - Implements traits defined in `stockdesk-core`
//! - Contains all "impure" code (network, environment, files)
//! - Every response shape the backend emits is normalised here

pub mod adapters;
pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use adapters::{HttpLocationDirectory, HttpResourceFetcher, HttpStockService};
pub use api::{AccessTokenProvider, ApiClient, ApiClientConfig, ApiError, SessionContext};
pub use http::HttpClient;
pub use observability::init_tracing;
