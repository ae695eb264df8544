//! Location directory port

use async_trait::async_trait;
use stockdesk_domain::{HierarchyLevel, Location, LocationTree, NodeDraft, Rack, Result, Room};

/// CRUD access to the location/room/rack collections.
#[async_trait]
pub trait LocationDirectory: Send + Sync {
    async fn list_locations(&self) -> Result<Vec<Location>>;

    async fn list_rooms(&self) -> Result<Vec<Room>>;

    async fn list_racks(&self) -> Result<Vec<Rack>>;

    /// Create a node and return its server-assigned id.
    async fn create_node(&self, level: HierarchyLevel, draft: &NodeDraft) -> Result<String>;

    async fn update_node(&self, level: HierarchyLevel, id: &str, draft: &NodeDraft) -> Result<()>;

    async fn delete_node(&self, level: HierarchyLevel, id: &str) -> Result<()>;

    /// All three collections in one tree.
    async fn load_tree(&self) -> Result<LocationTree> {
        let locations = self.list_locations().await?;
        let rooms = self.list_rooms().await?;
        let racks = self.list_racks().await?;
        Ok(LocationTree::new(locations, rooms, racks))
    }
}
