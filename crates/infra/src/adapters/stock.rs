//! Stock endpoints

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stockdesk_core::StockService;
use stockdesk_domain::{
    AdjustmentKind, ListQuery, Page, Placement, ReservationType, ResourceKey, Result,
    StockAdjustment, StockMovement, StockRecord, TransferRequest,
};
use tracing::debug;

use super::wire::{normalize_page, unwrap_single, IdRef};
use crate::api::{ApiClient, ApiError};

const LEVEL_PATH: &str = "/stock/level";
const ADJUST_PATH: &str = "/stock/adjust";
const TRANSFER_PATH: &str = "/stock/transfer";

/// [`StockService`] over the REST backend
pub struct HttpStockService {
    client: Arc<ApiClient>,
}

impl HttpStockService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct LevelQuery<'a> {
    product: &'a str,
    location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    room: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rack: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLevel {
    quantity: i64,
    #[serde(default)]
    reserved_quantity: i64,
    #[serde(default)]
    available_quantity: Option<i64>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

/// One row of `GET /stock`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireStockItem {
    product: IdRef,
    location: IdRef,
    #[serde(default)]
    room: Option<IdRef>,
    #[serde(default)]
    rack: Option<IdRef>,
    quantity: i64,
    #[serde(default)]
    reserved_quantity: i64,
    #[serde(default)]
    available_quantity: Option<i64>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

impl From<WireStockItem> for StockRecord {
    fn from(item: WireStockItem) -> Self {
        Self {
            product_id: item.product.into_id(),
            placement: Placement {
                location_id: item.location.into_id(),
                room_id: item.room.map(IdRef::into_id),
                rack_id: item.rack.map(IdRef::into_id),
            },
            quantity: item.quantity,
            reserved_quantity: item.reserved_quantity,
            available_quantity: item.available_quantity,
            last_updated: item.last_updated,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdjustBody<'a> {
    product: &'a str,
    location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    room: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rack: Option<&'a str>,
    adjustment_type: AdjustmentKind,
    quantity: i64,
    reason: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reservation_type: Option<ReservationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reserved_until: Option<DateTime<Utc>>,
}

impl<'a> AdjustBody<'a> {
    fn new(product: &'a str, placement: &'a Placement, adjustment: &'a StockAdjustment) -> Self {
        let reservation = adjustment.intent.reservation();
        Self {
            product,
            location: &placement.location_id,
            room: non_blank(placement.room_id.as_deref()),
            rack: non_blank(placement.rack_id.as_deref()),
            adjustment_type: adjustment.intent.kind(),
            quantity: adjustment.intent.quantity(),
            reason: adjustment.reason.trim(),
            notes: non_blank(adjustment.notes.as_deref()),
            reservation_type: reservation.map(|r| r.reservation_type),
            reference_id: reservation.and_then(|r| non_blank(r.reference_id.as_deref())),
            reserved_until: reservation.and_then(|r| r.reserved_until),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferBody<'a> {
    product: &'a str,
    from_location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_room: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_rack: Option<&'a str>,
    to_location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_room: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_rack: Option<&'a str>,
    quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

impl<'a> From<&'a TransferRequest> for TransferBody<'a> {
    fn from(req: &'a TransferRequest) -> Self {
        Self {
            product: &req.product_id,
            from_location: &req.source.location_id,
            from_room: non_blank(req.source.room_id.as_deref()),
            from_rack: non_blank(req.source.rack_id.as_deref()),
            to_location: &req.destination.location_id,
            to_room: non_blank(req.destination.room_id.as_deref()),
            to_rack: non_blank(req.destination.rack_id.as_deref()),
            quantity: req.quantity,
            notes: non_blank(req.notes.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl StockService for HttpStockService {
    async fn fetch_stock(
        &self,
        product_id: &str,
        placement: &Placement,
    ) -> Result<Option<StockRecord>> {
        let query = LevelQuery {
            product: product_id,
            location: &placement.location_id,
            room: non_blank(placement.room_id.as_deref()),
            rack: non_blank(placement.rack_id.as_deref()),
        };

        let value: Value = match self.client.get_with_query(LEVEL_PATH, &query).await {
            Ok(value) => value,
            Err(ApiError::NotFound(_)) => {
                debug!(product = product_id, location = %placement.location_id, "stock.level.absent");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let value = unwrap_single(value, "stock");
        if value.is_null() {
            return Ok(None);
        }
        let level: WireLevel = serde_json::from_value(value)
            .map_err(|e| ApiError::Decode(format!("stock level: {e}")))?;

        Ok(Some(StockRecord {
            product_id: product_id.to_string(),
            placement: placement.clone(),
            quantity: level.quantity,
            reserved_quantity: level.reserved_quantity,
            available_quantity: level.available_quantity,
            last_updated: level.last_updated,
        }))
    }

    async fn submit_adjustment(
        &self,
        product_id: &str,
        placement: &Placement,
        adjustment: &StockAdjustment,
    ) -> Result<()> {
        let body = AdjustBody::new(product_id, placement, adjustment);
        let _: Value = self.client.post(ADJUST_PATH, &body).await?;
        Ok(())
    }

    async fn submit_transfer(&self, request: &TransferRequest) -> Result<()> {
        let _: Value = self.client.post(TRANSFER_PATH, &TransferBody::from(request)).await?;
        Ok(())
    }

    async fn list_stock(&self, query: &ListQuery) -> Result<Page<StockRecord>> {
        let key = ResourceKey::StockLevels;
        let value: Value = self.client.get_with_query(key.path(), query).await?;
        let page: Page<WireStockItem> = normalize_page(value, key.collection_name())?;
        Ok(page.map(StockRecord::from))
    }

    async fn list_movements(&self, query: &ListQuery) -> Result<Page<StockMovement>> {
        let key = ResourceKey::StockMovements;
        let value: Value = self.client.get_with_query(key.path(), query).await?;
        Ok(normalize_page(value, key.collection_name())?)
    }
}
