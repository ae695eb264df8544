//! REST API client for the StockDesk backend
//!
//! # Architecture
//!
//! - Uses the crate's [`HttpClient`](crate::http::HttpClient) (no direct
//!   reqwest client construction)
//! - Bearer token supplied by an explicit [`SessionContext`]
//! - Timeout on every call, single attempt by default
//! - Backend error messages preserved through [`ApiError`]

pub mod auth;
pub mod client;
pub mod errors;

pub use auth::{AccessTokenProvider, SessionContext};
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};
