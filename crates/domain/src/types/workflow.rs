//! Multi-step sales workflow types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, FIRST_PAGE};
use crate::impl_domain_status_conversions;

/// Numeric identifier of a workflow step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u32);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remote list resources a step can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKey {
    Enquiries,
    Quotations,
    PurchaseOrders,
    Proformas,
    Invoices,
    Payments,
    Oems,
    OemOrders,
    StockLevels,
    StockMovements,
    Locations,
}

impl_domain_status_conversions!(ResourceKey {
    Enquiries => "enquiries",
    Quotations => "quotations",
    PurchaseOrders => "purchase-orders",
    Proformas => "proformas",
    Invoices => "invoices",
    Payments => "payments",
    Oems => "oems",
    OemOrders => "oem-orders",
    StockLevels => "stock-levels",
    StockMovements => "stock-movements",
    Locations => "locations",
});

impl ResourceKey {
    /// REST path of the list endpoint
    pub fn path(&self) -> &'static str {
        match self {
            Self::Enquiries => "/enquiries",
            Self::Quotations => "/quotations",
            Self::PurchaseOrders => "/purchase-orders",
            Self::Proformas => "/proformas",
            Self::Invoices => "/invoices",
            Self::Payments => "/payments",
            Self::Oems => "/oems",
            Self::OemOrders => "/oem-orders",
            Self::StockLevels => "/stock",
            Self::StockMovements => "/stock/movements",
            Self::Locations => "/locations",
        }
    }

    /// Key under which a wrapped payload may carry the list
    pub fn collection_name(&self) -> &'static str {
        match self {
            Self::Enquiries => "enquiries",
            Self::Quotations => "quotations",
            Self::PurchaseOrders => "purchaseOrders",
            Self::Proformas => "proformas",
            Self::Invoices => "invoices",
            Self::Payments => "payments",
            Self::Oems => "oems",
            Self::OemOrders => "oemOrders",
            Self::StockLevels => "stock",
            Self::StockMovements => "movements",
            Self::Locations => "locations",
        }
    }
}

/// Static description of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescriptor {
    pub id: StepId,
    pub title: String,
    /// `None` for steps that render without a list (e.g. settings)
    pub resource: Option<ResourceKey>,
}

impl StepDescriptor {
    pub fn new(id: u32, title: impl Into<String>, resource: Option<ResourceKey>) -> Self {
        Self { id: StepId(id), title: title.into(), resource }
    }
}

/// In-memory browsing state of the workflow screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub active_step: StepId,
    pub page: u32,
    pub page_size: u32,
    pub search_term: String,
}

impl WorkflowState {
    pub fn new(active_step: StepId, page_size: u32) -> Self {
        Self { active_step, page: FIRST_PAGE, page_size: page_size.max(1), search_term: String::new() }
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new(StepId(1), DEFAULT_PAGE_SIZE)
    }
}
