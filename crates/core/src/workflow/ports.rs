//! List resource port

use async_trait::async_trait;
use stockdesk_domain::{ListQuery, Page, ResourceKey, Result};

/// Fetches one page of a list resource, already normalised to [`Page`].
#[async_trait]
pub trait ResourceFetcher<T>: Send + Sync
where
    T: Send + 'static,
{
    async fn fetch_page(&self, resource: ResourceKey, query: &ListQuery) -> Result<Page<T>>;
}
