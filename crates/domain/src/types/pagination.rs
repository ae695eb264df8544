//! Canonical list/pagination shapes
//!
//! Adapters normalise whatever the backend sends into [`Page`]; nothing above
//! the adapter layer sees more than one response shape.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, FIRST_PAGE};

/// Authoritative pagination metadata reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// One page of a list resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: Option<PaginationMeta>) -> Self {
        Self { items, pagination }
    }

    /// A page with no server-side metadata
    pub fn unpaginated(items: Vec<T>) -> Self {
        Self { items, pagination: None }
    }

    pub fn empty() -> Self {
        Self { items: Vec::new(), pagination: None }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page { items: self.items.into_iter().map(f).collect(), pagination: self.pagination }
    }
}

/// Query parameters of a list request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page: page.max(FIRST_PAGE), limit: limit.max(1), search: None }
    }

    /// Attach a search term; blank terms are dropped.
    pub fn with_search(mut self, term: &str) -> Self {
        let trimmed = term.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(FIRST_PAGE, DEFAULT_PAGE_SIZE)
    }
}
