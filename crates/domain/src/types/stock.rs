//! Stock records and the mutation intents that change them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::placement::Placement;
use crate::impl_domain_status_conversions;

/// One product's quantity at one physical placement.
///
/// The client only ever holds a transient copy fetched before a mutation and
/// refreshed after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub product_id: String,
    pub placement: Placement,
    pub quantity: i64,
    #[serde(default)]
    pub reserved_quantity: i64,
    /// Server-authoritative availability, when the server sent it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl StockRecord {
    pub fn new(product_id: impl Into<String>, placement: Placement, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            placement,
            quantity,
            reserved_quantity: 0,
            available_quantity: None,
            last_updated: None,
        }
    }

    pub fn with_reserved(mut self, reserved: i64) -> Self {
        self.reserved_quantity = reserved;
        self
    }

    pub fn with_available(mut self, available: i64) -> Self {
        self.available_quantity = Some(available);
        self
    }

    /// Units free to reserve or move.
    ///
    /// The server value wins when present; otherwise `quantity - reserved`,
    /// never below zero.
    pub fn available(&self) -> i64 {
        self.available_quantity
            .unwrap_or_else(|| self.quantity.saturating_sub(self.reserved_quantity))
            .max(0)
    }

    pub fn levels(&self) -> StockLevels {
        StockLevels { quantity: self.quantity, reserved_quantity: self.reserved_quantity }
    }

    /// `0 <= reserved <= quantity`
    pub fn is_consistent(&self) -> bool {
        self.levels().is_consistent()
    }
}

/// The `{quantity, reservedQuantity}` pair shown before/after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevels {
    pub quantity: i64,
    pub reserved_quantity: i64,
}

impl StockLevels {
    pub fn available(&self) -> i64 {
        self.quantity.saturating_sub(self.reserved_quantity).max(0)
    }

    pub fn is_consistent(&self) -> bool {
        self.quantity >= 0 && self.reserved_quantity >= 0 && self.reserved_quantity <= self.quantity
    }
}

/// Why stock is being held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationType {
    Service,
    Sale,
    Transfer,
    Other,
}

impl_domain_status_conversions!(ReservationType {
    Service => "service",
    Sale => "sale",
    Transfer => "transfer",
    Other => "other",
});

/// Reservation details carried by a reserve intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_type: ReservationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_until: Option<DateTime<Utc>>,
}

impl Reservation {
    pub fn new(reservation_type: ReservationType) -> Self {
        Self { reservation_type, reference_id: None, reserved_until: None }
    }

    pub fn with_reference(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    pub fn until(mut self, reserved_until: DateTime<Utc>) -> Self {
        self.reserved_until = Some(reserved_until);
        self
    }
}

/// Wire name of a mutation intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Add,
    Subtract,
    Set,
    Reserve,
    Release,
}

impl_domain_status_conversions!(AdjustmentKind {
    Add => "add",
    Subtract => "subtract",
    Set => "set",
    Reserve => "reserve",
    Release => "release",
});

/// One of the five ways a stock record can be changed.
///
/// Quantities are signed so that bad input can be represented and rejected
/// by validation rather than by the type system at parse time. A reserve
/// intent may lack its reservation details for the same reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "adjustmentType", rename_all = "lowercase")]
pub enum MutationIntent {
    Add { quantity: i64 },
    Subtract { quantity: i64 },
    Set { quantity: i64 },
    Reserve { quantity: i64, reservation: Option<Reservation> },
    Release { quantity: i64 },
}

impl MutationIntent {
    pub fn kind(&self) -> AdjustmentKind {
        match self {
            Self::Add { .. } => AdjustmentKind::Add,
            Self::Subtract { .. } => AdjustmentKind::Subtract,
            Self::Set { .. } => AdjustmentKind::Set,
            Self::Reserve { .. } => AdjustmentKind::Reserve,
            Self::Release { .. } => AdjustmentKind::Release,
        }
    }

    pub fn quantity(&self) -> i64 {
        match self {
            Self::Add { quantity }
            | Self::Subtract { quantity }
            | Self::Set { quantity }
            | Self::Reserve { quantity, .. }
            | Self::Release { quantity } => *quantity,
        }
    }

    pub fn reservation(&self) -> Option<&Reservation> {
        match self {
            Self::Reserve { reservation, .. } => reservation.as_ref(),
            _ => None,
        }
    }
}

/// A mutation intent plus the free-text context every adjustment needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub intent: MutationIntent,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StockAdjustment {
    pub fn new(intent: MutationIntent, reason: impl Into<String>) -> Self {
        Self { intent, reason: reason.into(), notes: None }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// One entry of the stock ledger as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "product")]
    pub product_id: String,
    pub movement_type: String,
    pub quantity: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StockRecord {
        StockRecord::new("P1", Placement::at("L1"), 10).with_reserved(2)
    }

    #[test]
    fn available_prefers_server_value() {
        assert_eq!(record().available(), 8);
        assert_eq!(record().with_available(5).available(), 5);
    }

    #[test]
    fn available_never_negative() {
        let broken = StockRecord::new("P1", Placement::at("L1"), 1).with_reserved(4);
        assert_eq!(broken.available(), 0);
        assert!(!broken.is_consistent());
        assert_eq!(broken.with_available(-3).available(), 0);
    }

    #[test]
    fn intent_accessors() {
        let intent = MutationIntent::Reserve {
            quantity: 3,
            reservation: Some(Reservation::new(ReservationType::Sale).with_reference("SO-1")),
        };
        assert_eq!(intent.kind(), AdjustmentKind::Reserve);
        assert_eq!(intent.quantity(), 3);
        assert_eq!(intent.reservation().unwrap().reference_id.as_deref(), Some("SO-1"));
        assert!(MutationIntent::Add { quantity: 1 }.reservation().is_none());
    }

    #[test]
    fn kinds_round_trip_through_strings() {
        assert_eq!(AdjustmentKind::Subtract.to_string(), "subtract");
        assert_eq!("Release".parse::<AdjustmentKind>().unwrap(), AdjustmentKind::Release);
        assert_eq!("SERVICE".parse::<ReservationType>().unwrap(), ReservationType::Service);
        assert!("lend".parse::<ReservationType>().is_err());
    }

    #[test]
    fn record_deserializes_from_camel_case() {
        let json = r#"{
            "productId": "P1",
            "placement": {"locationId": "L1", "roomId": "R1"},
            "quantity": 10,
            "reservedQuantity": 2
        }"#;
        let parsed: StockRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.placement.room_id.as_deref(), Some("R1"));
        assert_eq!(parsed.available(), 8);
    }
}
