//! Validation and preview of the five stock mutation intents.
//!
//! Every rule is evaluated against the snapshot the caller holds; all failing
//! rules are reported together so the form can mark every offending field at
//! once. Nothing here touches the network.

use stockdesk_common::{FieldError, ValidationResult, Validator};
use stockdesk_domain::constants::{
    CODE_EXCEEDS_AVAILABLE, CODE_EXCEEDS_RESERVED, CODE_EXCEEDS_STOCK, CODE_OVERFLOW,
    FIELD_QUANTITY, FIELD_REASON, FIELD_RESERVATION_TYPE,
};
use stockdesk_domain::{
    MutationIntent, Result, StockAdjustment, StockDeskError, StockLevels, StockRecord,
};

const MSG_POSITIVE: &str = "Quantity must be greater than 0";
const MSG_NEGATIVE: &str = "Quantity cannot be negative";
const MSG_RESERVATION_TYPE: &str = "Reservation type is required";
const MSG_REASON: &str = "Reason is required";
const MSG_OVERFLOW: &str = "Quantity is too large";

/// Stateless rule set for stock adjustments.
pub struct StockMutationModel;

impl StockMutationModel {
    /// Validate an adjustment against the snapshot the user is looking at.
    ///
    /// A missing or internally inconsistent snapshot is a precondition
    /// failure, never a validation error: the caller has to refetch first.
    pub fn validate(current: Option<&StockRecord>, adjustment: &StockAdjustment) -> Result<()> {
        let current = Self::require_snapshot(current)?;
        Self::check(current, adjustment).map_err(StockDeskError::from)
    }

    /// Field rules only, for a snapshot already known to be usable.
    pub fn check(current: &StockRecord, adjustment: &StockAdjustment) -> ValidationResult<()> {
        let mut validator = Validator::new();
        Self::check_intent(&mut validator, current, &adjustment.intent);
        validator.require_not_blank(FIELD_REASON, &adjustment.reason, MSG_REASON);
        validator.finalize()
    }

    /// Reject snapshots that cannot be validated against.
    pub fn require_snapshot(current: Option<&StockRecord>) -> Result<&StockRecord> {
        let record = current.ok_or_else(|| {
            StockDeskError::Precondition(
                "no stock record is loaded for this product and placement".to_string(),
            )
        })?;

        if !record.is_consistent() {
            return Err(StockDeskError::Precondition(format!(
                "stock record for {} is inconsistent (quantity {}, reserved {})",
                record.product_id, record.quantity, record.reserved_quantity
            )));
        }

        Ok(record)
    }

    fn check_intent(validator: &mut Validator, current: &StockRecord, intent: &MutationIntent) {
        match intent {
            MutationIntent::Add { quantity } => {
                if validator.require_positive(FIELD_QUANTITY, *quantity, MSG_POSITIVE)
                    && current.quantity.checked_add(*quantity).is_none()
                {
                    validator.push(
                        FieldError::new(FIELD_QUANTITY, MSG_OVERFLOW).with_code(CODE_OVERFLOW),
                    );
                }
            }
            MutationIntent::Subtract { quantity } => {
                if validator.require_positive(FIELD_QUANTITY, *quantity, MSG_POSITIVE) {
                    validator.require_at_most(
                        FIELD_QUANTITY,
                        *quantity,
                        current.quantity,
                        CODE_EXCEEDS_STOCK,
                        format!("Cannot subtract more than current stock ({})", current.quantity),
                    );
                }
            }
            MutationIntent::Set { quantity } => {
                validator.require_non_negative(FIELD_QUANTITY, *quantity, MSG_NEGATIVE);
            }
            MutationIntent::Reserve { quantity, reservation } => {
                if validator.require_positive(FIELD_QUANTITY, *quantity, MSG_POSITIVE) {
                    let available = current.available();
                    validator.require_at_most(
                        FIELD_QUANTITY,
                        *quantity,
                        available,
                        CODE_EXCEEDS_AVAILABLE,
                        format!("Cannot reserve more than available stock ({available})"),
                    );
                }
                validator.require_present(
                    FIELD_RESERVATION_TYPE,
                    reservation.as_ref(),
                    MSG_RESERVATION_TYPE,
                );
            }
            MutationIntent::Release { quantity } => {
                if validator.require_positive(FIELD_QUANTITY, *quantity, MSG_POSITIVE) {
                    validator.require_at_most(
                        FIELD_QUANTITY,
                        *quantity,
                        current.reserved_quantity,
                        CODE_EXCEEDS_RESERVED,
                        format!(
                            "Cannot release more than reserved stock ({})",
                            current.reserved_quantity
                        ),
                    );
                }
            }
        }
    }

    /// Levels the record would have after the intent.
    ///
    /// Total for any input so the form can show a live preview while the
    /// user is still typing. Negative amounts count as zero and the result
    /// always satisfies `0 <= reserved <= quantity`: shrinking stock below
    /// the reserved amount shrinks the reservation with it.
    pub fn preview(current: &StockRecord, intent: &MutationIntent) -> StockLevels {
        let StockLevels { quantity, reserved_quantity: reserved } = current.levels();
        let amount = intent.quantity().max(0);

        let (quantity, reserved) = match intent {
            MutationIntent::Add { .. } => (quantity.saturating_add(amount), reserved),
            MutationIntent::Subtract { .. } => (quantity.saturating_sub(amount), reserved),
            MutationIntent::Set { .. } => (amount, reserved),
            MutationIntent::Reserve { .. } => (quantity, reserved.saturating_add(amount)),
            MutationIntent::Release { .. } => (quantity, reserved.saturating_sub(amount)),
        };

        let quantity = quantity.max(0);
        StockLevels { quantity, reserved_quantity: reserved.clamp(0, quantity) }
    }

    /// Speculative record after the intent, used when the authoritative
    /// refetch after a successful submit is not available.
    ///
    /// The server's availability figure no longer applies and is dropped.
    pub fn apply(current: &StockRecord, intent: &MutationIntent) -> StockRecord {
        let levels = Self::preview(current, intent);
        StockRecord {
            quantity: levels.quantity,
            reserved_quantity: levels.reserved_quantity,
            available_quantity: None,
            ..current.clone()
        }
    }
}
