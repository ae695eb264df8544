//! Sparse registry of workflow steps.
//!
//! Step ids need not be contiguous. An id between the first and last
//! registered step with no descriptor is a placeholder: it can be navigated
//! to and renders as "coming soon" with no data binding.

use std::collections::BTreeMap;

use stockdesk_domain::{ResourceKey, Result, StepDescriptor, StepId, StockDeskError};

/// What the UI should render for a step id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepView<'a> {
    Assigned(&'a StepDescriptor),
    Placeholder(StepId),
}

impl StepView<'_> {
    pub fn id(&self) -> StepId {
        match self {
            Self::Assigned(step) => step.id,
            Self::Placeholder(id) => *id,
        }
    }

    pub fn resource(&self) -> Option<ResourceKey> {
        match self {
            Self::Assigned(step) => step.resource,
            Self::Placeholder(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRegistry {
    steps: BTreeMap<StepId, StepDescriptor>,
}

impl StepRegistry {
    /// Build a registry; ids must be non-zero and unique, and at least one
    /// step is required.
    pub fn new(steps: impl IntoIterator<Item = StepDescriptor>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for step in steps {
            if step.id.0 == 0 {
                return Err(StockDeskError::InvalidInput(format!(
                    "step '{}' has id 0; ids start at 1",
                    step.title
                )));
            }
            if let Some(existing) = map.insert(step.id, step) {
                return Err(StockDeskError::InvalidInput(format!(
                    "step id {} is registered twice ('{}')",
                    existing.id, existing.title
                )));
            }
        }

        if map.is_empty() {
            return Err(StockDeskError::InvalidInput("workflow has no steps".to_string()));
        }

        Ok(Self { steps: map })
    }

    /// The DG sales workflow. Ids 9 and 13 to 19 are reserved placeholders.
    pub fn dg_sales() -> Self {
        let steps = [
            StepDescriptor::new(1, "Enquiries", Some(ResourceKey::Enquiries)),
            StepDescriptor::new(2, "Quotations", Some(ResourceKey::Quotations)),
            StepDescriptor::new(3, "Purchase Orders", Some(ResourceKey::PurchaseOrders)),
            StepDescriptor::new(4, "Proformas", Some(ResourceKey::Proformas)),
            StepDescriptor::new(5, "Invoices", Some(ResourceKey::Invoices)),
            StepDescriptor::new(6, "Payments", Some(ResourceKey::Payments)),
            StepDescriptor::new(7, "OEMs", Some(ResourceKey::Oems)),
            StepDescriptor::new(8, "OEM Orders", Some(ResourceKey::OemOrders)),
            StepDescriptor::new(10, "Stock Levels", Some(ResourceKey::StockLevels)),
            StepDescriptor::new(11, "Stock Ledger", Some(ResourceKey::StockMovements)),
            StepDescriptor::new(12, "Locations", Some(ResourceKey::Locations)),
            StepDescriptor::new(20, "Settings", None),
        ];
        Self { steps: steps.into_iter().map(|step| (step.id, step)).collect() }
    }

    /// Lowest registered id
    pub fn first(&self) -> StepId {
        self.steps.keys().next().copied().unwrap_or(StepId(1))
    }

    /// Highest registered id
    pub fn last(&self) -> StepId {
        self.steps.keys().next_back().copied().unwrap_or(StepId(1))
    }

    /// Whether `id` can be navigated to, assigned or placeholder.
    pub fn contains_slot(&self, id: StepId) -> bool {
        id >= self.first() && id <= self.last()
    }

    pub fn get(&self, id: StepId) -> Option<&StepDescriptor> {
        self.steps.get(&id)
    }

    pub fn view(&self, id: StepId) -> Option<StepView<'_>> {
        match self.steps.get(&id) {
            Some(step) => Some(StepView::Assigned(step)),
            None if self.contains_slot(id) => Some(StepView::Placeholder(id)),
            None => None,
        }
    }

    pub fn resource_for(&self, id: StepId) -> Option<ResourceKey> {
        self.get(id).and_then(|step| step.resource)
    }

    /// Every navigable slot in order
    pub fn views(&self) -> impl Iterator<Item = StepView<'_>> + '_ {
        (self.first().0..=self.last().0).filter_map(move |id| self.view(StepId(id)))
    }

    pub fn placeholders(&self) -> Vec<StepId> {
        self.views()
            .filter_map(|view| match view {
                StepView::Placeholder(id) => Some(id),
                StepView::Assigned(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::dg_sales()
    }
}
