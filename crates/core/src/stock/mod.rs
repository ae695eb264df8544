//! Stock levels: mutation rules, backend port and the adjust/transfer service

pub mod mutation;
pub mod ports;
pub mod service;

pub use mutation::StockMutationModel;
pub use ports::*;
pub use service::{MutationOutcome, StockMutationService};
