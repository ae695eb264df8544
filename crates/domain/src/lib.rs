//! # StockDesk Domain
//!
//! Business domain types and models for StockDesk.
//!
//! This crate contains:
//! - Stock records, mutation intents, placements and transfer requests
//! - Workflow step and pagination types
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - Depends only on `stockdesk-common` for field-level validation errors
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use stockdesk_common::{FieldError, ValidationError};
pub use types::*;
