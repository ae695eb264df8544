//! Per-session coordination state

pub mod lock;

pub use lock::{MutationLock, MutationTicket};
