//! Observability setup
//!
//! Structured logging only: every crate emits `tracing` events with dotted
//! names (`stock.adjust.submit`) and key/value fields; this module installs
//! the subscriber that formats them.

pub mod logging;

pub use logging::{build_filter, init_tracing};
