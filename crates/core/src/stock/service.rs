//! Stock mutation service - adjust and transfer flows
//!
//! Both flows share the same shape: hold the session ticket, validate against
//! the snapshot the user saw, refetch and validate again so a concurrent
//! change is reported instead of overwritten, submit, then refetch for the
//! authoritative result.

use std::sync::Arc;

use serde::Serialize;
use stockdesk_common::ValidationError;
use stockdesk_domain::constants::{
    CODE_EXCEEDS_AVAILABLE, CODE_EXCEEDS_RESERVED, CODE_EXCEEDS_STOCK,
};
use stockdesk_domain::{
    LocationTree, MutationIntent, Placement, Result, StockAdjustment, StockDeskError, StockRecord,
    TransferRequest,
};
use tracing::{debug, info, warn};

use super::mutation::StockMutationModel;
use super::ports::StockService;
use crate::session::{MutationLock, MutationTicket};
use crate::transfer::TransferValidator;

/// Before/after view of a completed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub before: StockRecord,
    pub after: StockRecord,
    /// `false` when `after` was computed locally because the post-submit
    /// refetch failed.
    pub authoritative: bool,
}

/// Runs stock adjustments and transfers against the remote stock service.
pub struct StockMutationService {
    stock: Arc<dyn StockService>,
    lock: MutationLock,
}

impl StockMutationService {
    pub fn new(stock: Arc<dyn StockService>) -> Self {
        Self { stock, lock: MutationLock::new() }
    }

    /// Share an existing session lock
    pub fn with_lock(mut self, lock: MutationLock) -> Self {
        self.lock = lock;
        self
    }

    pub fn lock(&self) -> &MutationLock {
        &self.lock
    }

    /// Open a mutation form. Fails with `Busy` while another one is open.
    pub fn begin(&self, label: &str) -> Result<MutationTicket> {
        self.lock.try_acquire(label)
    }

    /// Fetch the snapshot a form validates against.
    pub async fn load(&self, product_id: &str, placement: &Placement) -> Result<Option<StockRecord>> {
        self.stock.fetch_stock(product_id, placement).await
    }

    /// Adjust the stock record the user is looking at.
    ///
    /// `seen` is the snapshot the form was validated against. Limits that no
    /// longer hold on the refetched record fail with `StaleState`.
    pub async fn adjust(
        &self,
        ticket: &MutationTicket,
        seen: Option<&StockRecord>,
        adjustment: &StockAdjustment,
    ) -> Result<MutationOutcome> {
        self.lock.ensure_current(ticket)?;

        let seen = StockMutationModel::require_snapshot(seen)?;
        StockMutationModel::check(seen, adjustment)?;

        let fresh = self.refetch(&seen.product_id, &seen.placement).await?;
        StockMutationModel::require_snapshot(Some(&fresh))?;
        StockMutationModel::check(&fresh, adjustment).map_err(stale_or_invalid)?;

        let kind = adjustment.intent.kind();
        info!(
            product = %fresh.product_id,
            location = %fresh.placement.location_id,
            kind = %kind,
            quantity = adjustment.intent.quantity(),
            "stock.adjust.submit"
        );
        self.stock
            .submit_adjustment(&fresh.product_id, &fresh.placement, adjustment)
            .await
            .inspect_err(|err| warn!(error = %err, kind = %kind, "stock.adjust.failed"))?;

        let (after, authoritative) = self.settle(&fresh, &adjustment.intent).await;
        Ok(MutationOutcome { before: fresh, after, authoritative })
    }

    /// Move stock between placements.
    ///
    /// The outcome describes the source placement.
    pub async fn transfer(
        &self,
        ticket: &MutationTicket,
        tree: &LocationTree,
        seen: Option<&StockRecord>,
        request: &TransferRequest,
    ) -> Result<MutationOutcome> {
        self.lock.ensure_current(ticket)?;

        let validator = TransferValidator::new(tree);
        validator.validate(request, seen)?;

        let fresh = self.refetch(&request.product_id, &request.source).await?;
        validator.validate(request, Some(&fresh)).map_err(|err| match err {
            StockDeskError::Validation(errors) => stale_or_invalid(errors),
            other => other,
        })?;

        info!(
            product = %request.product_id,
            from = %request.source.location_id,
            to = %request.destination.location_id,
            quantity = request.quantity,
            "stock.transfer.submit"
        );
        self.stock
            .submit_transfer(request)
            .await
            .inspect_err(|err| warn!(error = %err, "stock.transfer.failed"))?;

        let moved = MutationIntent::Subtract { quantity: request.quantity };
        let (after, authoritative) = self.settle(&fresh, &moved).await;
        Ok(MutationOutcome { before: fresh, after, authoritative })
    }

    async fn refetch(&self, product_id: &str, placement: &Placement) -> Result<StockRecord> {
        self.stock.fetch_stock(product_id, placement).await?.ok_or_else(|| {
            StockDeskError::StaleState(format!(
                "stock record for {product_id} at {} no longer exists",
                placement.location_id
            ))
        })
    }

    /// Authoritative record after a successful submit, or the local
    /// projection when the refetch does not produce one.
    async fn settle(&self, before: &StockRecord, intent: &MutationIntent) -> (StockRecord, bool) {
        match self.stock.fetch_stock(&before.product_id, &before.placement).await {
            Ok(Some(record)) => {
                debug!(product = %record.product_id, quantity = record.quantity, "stock.refetched");
                (record, true)
            }
            Ok(None) => {
                warn!(product = %before.product_id, "stock.refetch_missing");
                (StockMutationModel::apply(before, intent), false)
            }
            Err(err) => {
                warn!(product = %before.product_id, error = %err, "stock.refetch_failed");
                (StockMutationModel::apply(before, intent), false)
            }
        }
    }
}

/// Limit violations that only appear on the refetched record mean stock
/// moved underneath the form; anything else is plain invalid input.
fn stale_or_invalid(errors: ValidationError) -> StockDeskError {
    let stale = [CODE_EXCEEDS_STOCK, CODE_EXCEEDS_AVAILABLE, CODE_EXCEEDS_RESERVED]
        .iter()
        .find_map(|code| errors.errors.iter().find(|e| e.code.as_deref() == Some(*code)));

    match stale {
        Some(field) => StockDeskError::StaleState(field.message.clone()),
        None => StockDeskError::Validation(errors),
    }
}
