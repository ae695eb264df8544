//! Shared utilities for StockDesk crates.
//!
//! Currently this is the field-level validation framework used by the stock
//! mutation model, the transfer validator and the hierarchy selector. Errors
//! are collected per field and never short-circuit, so a caller can annotate
//! every invalid input at once.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod validation;

pub use validation::{FieldError, ValidationError, ValidationResult, Validator};
