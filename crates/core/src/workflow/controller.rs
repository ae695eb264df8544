//! Step controller for the multi-step workflow screen.
//!
//! The controller owns the browsing state and decides what to fetch; the
//! caller performs the fetch and hands the result back. Every state change
//! bumps a generation counter, and results issued for an older generation
//! are dropped so a slow response can never overwrite a newer view.

use stockdesk_domain::constants::{FIRST_PAGE, MAX_PAGE_SIZE};
use stockdesk_domain::{
    ListQuery, Page, ResourceKey, Result, StepId, StockDeskError, WorkflowState,
};
use tracing::{debug, warn};

use super::ports::ResourceFetcher;
use super::steps::{StepRegistry, StepView};

/// Everything needed to fetch the active step's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub step: StepId,
    pub resource: ResourceKey,
    pub query: ListQuery,
}

/// What [`WorkflowStepController::apply`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The fetch failed; the list is empty and the error is kept.
    Failed,
    /// The response belongs to an older generation and was ignored.
    Stale,
    /// The active step has nothing to fetch.
    NoResource,
}

pub struct WorkflowStepController<T> {
    registry: StepRegistry,
    state: WorkflowState,
    activated: bool,
    generation: u64,
    items: Vec<T>,
    total_items: u64,
    total_pages: u32,
    degraded: bool,
    last_error: Option<StockDeskError>,
}

impl<T> WorkflowStepController<T>
where
    T: Send + 'static,
{
    /// Start on the registry's first step.
    pub fn new(registry: StepRegistry, page_size: u32) -> Self {
        let state = WorkflowState::new(registry.first(), page_size.clamp(1, MAX_PAGE_SIZE));
        Self {
            registry,
            state,
            activated: false,
            generation: 0,
            items: Vec::new(),
            total_items: 0,
            total_pages: 1,
            degraded: false,
            last_error: None,
        }
    }

    /// Switch steps. Always returns to page 1; cached totals are cleared on
    /// every activation except the first.
    pub fn set_active_step(&mut self, id: StepId) -> Result<()> {
        if !self.registry.contains_slot(id) {
            return Err(StockDeskError::InvalidInput(format!(
                "step {id} is not part of this workflow"
            )));
        }

        self.state.active_step = id;
        self.state.page = FIRST_PAGE;
        if self.activated {
            self.items.clear();
            self.total_items = 0;
            self.total_pages = 1;
            self.degraded = false;
        }
        self.activated = true;
        self.last_error = None;
        self.bump();
        debug!(step = %id, generation = self.generation, "workflow.step_activated");
        Ok(())
    }

    pub fn set_page(&mut self, page: u32) {
        self.state.page = page.max(FIRST_PAGE);
        self.bump();
    }

    /// Changing the filter returns to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.state.page = FIRST_PAGE;
        self.bump();
    }

    /// Changing the page size returns to page 1.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.state.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.state.page = FIRST_PAGE;
        self.bump();
    }

    /// Request for the active step, or `None` when it has no list.
    pub fn request(&self) -> Option<FetchRequest> {
        let step = self.state.active_step;
        let resource = self.registry.resource_for(step)?;
        let query = ListQuery::new(self.state.page, self.state.page_size)
            .with_search(&self.state.search_term);
        Some(FetchRequest { generation: self.generation, step, resource, query })
    }

    /// Apply a fetch result issued for `generation`.
    pub fn apply(&mut self, generation: u64, result: Result<Page<T>>) -> ApplyOutcome {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "workflow.stale_response_dropped"
            );
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.apply_page(page);
                ApplyOutcome::Applied
            }
            Err(err) => {
                warn!(
                    step = %self.state.active_step,
                    error = %err,
                    kind = err.label(),
                    "workflow.fetch_failed"
                );
                self.clear_list();
                self.last_error = Some(err);
                ApplyOutcome::Failed
            }
        }
    }

    /// Fetch and apply the active step's list in one go.
    pub async fn refresh<F>(&mut self, fetcher: &F) -> ApplyOutcome
    where
        F: ResourceFetcher<T> + ?Sized,
    {
        let Some(request) = self.request() else {
            self.clear_list();
            self.last_error = None;
            return ApplyOutcome::NoResource;
        };

        let result = fetcher.fetch_page(request.resource, &request.query).await;
        self.apply(request.generation, result)
    }

    fn apply_page(&mut self, page: Page<T>) {
        self.last_error = None;
        match page.pagination {
            Some(meta) => {
                self.total_items = meta.total;
                self.total_pages = meta.total_pages.max(1);
                self.state.page = meta.page.max(FIRST_PAGE);
                self.degraded = false;
            }
            None => {
                let len = page.items.len() as u64;
                let size = u64::from(self.state.page_size.max(1));
                self.total_items = len;
                self.total_pages = u32::try_from(len.div_ceil(size)).unwrap_or(u32::MAX).max(1);
                self.state.page = FIRST_PAGE;
                self.degraded = true;
            }
        }
        self.items = page.items;
    }

    fn clear_list(&mut self) {
        self.items.clear();
        self.total_items = 0;
        self.total_pages = 1;
        self.degraded = false;
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn active_step(&self) -> StepId {
        self.state.active_step
    }

    pub fn active_view(&self) -> Option<StepView<'_>> {
        self.registry.view(self.state.active_step)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Pagination was computed locally because the server sent none.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn last_error(&self) -> Option<&StockDeskError> {
        self.last_error.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
