//! Location maintenance service

use std::sync::Arc;

use stockdesk_common::{FieldError, Validator};
use stockdesk_domain::constants::CODE_UNKNOWN_NODE;
use stockdesk_domain::{HierarchyLevel, LocationTree, NodeDraft, Result, StockDeskError};
use tracing::{debug, info};

use super::hierarchy::LocationHierarchySelector;
use super::ports::LocationDirectory;

const FIELD_NAME: &str = "name";

/// Validates hierarchy edits locally before handing them to the directory.
pub struct LocationService {
    directory: Arc<dyn LocationDirectory>,
}

impl LocationService {
    pub fn new(directory: Arc<dyn LocationDirectory>) -> Self {
        Self { directory }
    }

    pub async fn load_tree(&self) -> Result<LocationTree> {
        let tree = self.directory.load_tree().await?;
        debug!(
            locations = tree.locations.len(),
            rooms = tree.rooms.len(),
            racks = tree.racks.len(),
            "placement.tree_loaded"
        );
        Ok(tree)
    }

    /// Refetch the tree into `selector`; `true` when its selection shrank.
    pub async fn refresh(&self, selector: &mut LocationHierarchySelector) -> Result<bool> {
        let tree = self.load_tree().await?;
        Ok(selector.refresh(tree))
    }

    /// Field errors for a draft, checked against the tree the user sees.
    pub fn validate_draft(level: HierarchyLevel, draft: &NodeDraft, tree: &LocationTree) -> Result<()> {
        let mut validator = Validator::new();
        validator.require_not_blank(FIELD_NAME, &draft.name, "Name is required");

        if let Some(parent_field) = level.parent_field() {
            let parent = draft.parent_id.as_deref().map(str::trim).filter(|id| !id.is_empty());
            match parent {
                None => {
                    validator.push(
                        FieldError::new(parent_field, format!("{} is required", title(parent_field)))
                            .with_code("required"),
                    );
                }
                Some(id) => {
                    let exists = match level {
                        HierarchyLevel::Room => tree.location(id).is_some(),
                        HierarchyLevel::Rack => tree.room(id).is_some(),
                        HierarchyLevel::Location => true,
                    };
                    if !exists {
                        validator.push(
                            FieldError::new(parent_field, format!("{} not found", title(parent_field)))
                                .with_code(CODE_UNKNOWN_NODE)
                                .with_metadata("id", id),
                        );
                    }
                }
            }
        }

        validator.finalize().map_err(StockDeskError::from)
    }

    pub async fn create(
        &self,
        level: HierarchyLevel,
        draft: &NodeDraft,
        tree: &LocationTree,
    ) -> Result<String> {
        Self::validate_draft(level, draft, tree)?;
        let id = self.directory.create_node(level, draft).await?;
        info!(level = %level, id = %id, "placement.node_created");
        Ok(id)
    }

    pub async fn update(
        &self,
        level: HierarchyLevel,
        id: &str,
        draft: &NodeDraft,
        tree: &LocationTree,
    ) -> Result<()> {
        Self::validate_draft(level, draft, tree)?;
        self.directory.update_node(level, id, draft).await?;
        info!(level = %level, id, "placement.node_updated");
        Ok(())
    }

    /// Delete a node. Nodes that still have children are refused locally.
    pub async fn delete(&self, level: HierarchyLevel, id: &str, tree: &LocationTree) -> Result<()> {
        let children = match level {
            HierarchyLevel::Location => tree.rooms.iter().filter(|r| r.location == id).count(),
            HierarchyLevel::Room => tree.racks.iter().filter(|r| r.room == id).count(),
            HierarchyLevel::Rack => 0,
        };
        if children > 0 {
            return Err(StockDeskError::InvalidInput(format!(
                "{level} {id} still contains {children} child node(s)"
            )));
        }

        self.directory.delete_node(level, id).await?;
        info!(level = %level, id, "placement.node_deleted");
        Ok(())
    }
}

fn title(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
