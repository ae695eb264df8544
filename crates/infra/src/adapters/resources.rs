//! Paginated list resources driven by the workflow controller

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use stockdesk_core::ResourceFetcher;
use stockdesk_domain::{ListQuery, Page, ResourceKey, Result};
use tracing::debug;

use super::wire::normalize_page;
use crate::api::ApiClient;

/// [`ResourceFetcher`] decoding every list item as `T`.
///
/// Use `serde_json::Value` for `T` when the caller renders rows generically.
pub struct HttpResourceFetcher<T> {
    client: Arc<ApiClient>,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpResourceFetcher<T> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client, _item: PhantomData }
    }
}

#[async_trait]
impl<T> ResourceFetcher<T> for HttpResourceFetcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, resource: ResourceKey, query: &ListQuery) -> Result<Page<T>> {
        let value: Value = self.client.get_with_query(resource.path(), query).await?;
        let page = normalize_page(value, resource.collection_name())?;
        debug!(
            %resource,
            page = query.page,
            items = page.items.len(),
            paginated = page.pagination.is_some(),
            "resource.page_fetched"
        );
        Ok(page)
    }
}
