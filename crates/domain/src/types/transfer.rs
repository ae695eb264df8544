//! Stock transfer between two placements

use serde::{Deserialize, Serialize};

use super::placement::Placement;

/// Move `quantity` units of a product from `source` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub product_id: String,
    pub source: Placement,
    pub destination: Placement,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransferRequest {
    pub fn new(
        product_id: impl Into<String>,
        source: Placement,
        destination: Placement,
        quantity: i64,
    ) -> Self {
        Self { product_id: product_id.into(), source, destination, quantity, notes: None }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Source and destination are the same placement
    pub fn is_noop(&self) -> bool {
        self.source.same_as(&self.destination)
    }
}
