//! # StockDesk Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Stock mutation and transfer rules
//! - Location → Room → Rack selection
//! - The multi-step workflow controller
//! - Port/adapter interfaces (traits) for the REST backend
//!
//! ## Architecture Principles
//! - Only depends on `stockdesk-common` and `stockdesk-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Validation runs before any network call and never panics on bad input

pub mod placement;
pub mod session;
pub mod stock;
pub mod transfer;
pub mod workflow;

// Re-export specific items to avoid ambiguity
pub use placement::ports::LocationDirectory;
pub use placement::{LocationHierarchySelector, LocationService};
pub use session::{MutationLock, MutationTicket};
pub use stock::ports::StockService;
pub use stock::{MutationOutcome, StockMutationModel, StockMutationService};
pub use transfer::TransferValidator;
pub use workflow::ports::ResourceFetcher;
pub use workflow::{ApplyOutcome, FetchRequest, StepRegistry, StepView, WorkflowStepController};
