//! Multi-step sales workflow

pub mod controller;
pub mod ports;
pub mod steps;

pub use controller::{ApplyOutcome, FetchRequest, WorkflowStepController};
pub use steps::{StepRegistry, StepView};
