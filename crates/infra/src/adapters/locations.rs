//! Location, room and rack endpoints

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use stockdesk_core::LocationDirectory;
use stockdesk_domain::{HierarchyLevel, Location, NodeDraft, Rack, Result, Room};

use super::wire::{created_id, normalize_collection};
use crate::api::ApiClient;

/// [`LocationDirectory`] over `/locations`, `/rooms` and `/racks`
pub struct HttpLocationDirectory {
    client: Arc<ApiClient>,
}

impl HttpLocationDirectory {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn list<T>(&self, level: HierarchyLevel) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let collection = level.collection();
        let value: Value = self.client.get(&format!("/{collection}")).await?;
        Ok(normalize_collection(value, collection)?)
    }
}

/// Create/update body. The parent reference is named after the parent level
/// (`location` for rooms, `room` for racks).
#[derive(Debug, Serialize)]
struct NodeBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    room: Option<&'a str>,
}

impl<'a> NodeBody<'a> {
    fn new(level: HierarchyLevel, draft: &'a NodeDraft) -> Self {
        let parent = draft.parent_id.as_deref().map(str::trim).filter(|p| !p.is_empty());
        let (location, room) = match level {
            HierarchyLevel::Location => (None, None),
            HierarchyLevel::Room => (parent, None),
            HierarchyLevel::Rack => (None, parent),
        };
        Self {
            name: draft.name.trim(),
            code: draft.code.as_deref(),
            description: draft.description.as_deref(),
            location,
            room,
        }
    }
}

#[async_trait]
impl LocationDirectory for HttpLocationDirectory {
    async fn list_locations(&self) -> Result<Vec<Location>> {
        self.list(HierarchyLevel::Location).await
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        self.list(HierarchyLevel::Room).await
    }

    async fn list_racks(&self) -> Result<Vec<Rack>> {
        self.list(HierarchyLevel::Rack).await
    }

    async fn create_node(&self, level: HierarchyLevel, draft: &NodeDraft) -> Result<String> {
        let path = format!("/{}", level.collection());
        let value: Value = self.client.post(&path, &NodeBody::new(level, draft)).await?;
        Ok(created_id(value, &level.to_string())?)
    }

    async fn update_node(&self, level: HierarchyLevel, id: &str, draft: &NodeDraft) -> Result<()> {
        let path = format!("/{}/{}", level.collection(), id);
        let _: Value = self.client.put(&path, &NodeBody::new(level, draft)).await?;
        Ok(())
    }

    async fn delete_node(&self, level: HierarchyLevel, id: &str) -> Result<()> {
        let path = format!("/{}/{}", level.collection(), id);
        Ok(self.client.delete(&path).await?)
    }
}
