//! Stock backend port

use async_trait::async_trait;
use stockdesk_domain::{
    ListQuery, Page, Placement, Result, StockAdjustment, StockMovement, StockRecord,
    TransferRequest,
};

/// Remote stock service.
///
/// Implementations own transport and response-shape normalisation; callers
/// only ever see canonical domain types.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Current record for one product at one placement; `Ok(None)` when the
    /// backend has no record there.
    async fn fetch_stock(
        &self,
        product_id: &str,
        placement: &Placement,
    ) -> Result<Option<StockRecord>>;

    /// Submit one adjustment. Success carries no payload; refetch to see the
    /// new levels.
    async fn submit_adjustment(
        &self,
        product_id: &str,
        placement: &Placement,
        adjustment: &StockAdjustment,
    ) -> Result<()>;

    async fn submit_transfer(&self, request: &TransferRequest) -> Result<()>;

    async fn list_stock(&self, query: &ListQuery) -> Result<Page<StockRecord>>;

    /// Stock ledger
    async fn list_movements(&self, query: &ListQuery) -> Result<Page<StockMovement>>;
}
