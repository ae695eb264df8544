//! Domain types and models

pub mod pagination;
pub mod placement;
pub mod stock;
pub mod transfer;
pub mod workflow;

pub use pagination::{ListQuery, Page, PaginationMeta};
pub use placement::{
    HierarchyLevel, HierarchySelection, Location, LocationTree, NodeDraft, Placement, Rack, Room,
};
pub use stock::{
    AdjustmentKind, MutationIntent, Reservation, ReservationType, StockAdjustment, StockLevels,
    StockMovement, StockRecord,
};
pub use transfer::TransferRequest;
pub use workflow::{ResourceKey, StepDescriptor, StepId, WorkflowState};
