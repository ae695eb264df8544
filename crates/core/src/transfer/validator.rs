//! Local checks for a transfer request.
//!
//! The destination is resolved against the caller's [`LocationTree`]; the
//! quantity is bounded by what is available at the source.

use stockdesk_common::{FieldError, ValidationResult, Validator};
use stockdesk_domain::constants::{
    CODE_EXCEEDS_AVAILABLE, CODE_SAME_PLACEMENT, CODE_UNKNOWN_NODE, FIELD_PRODUCT, FIELD_QUANTITY,
    FIELD_TO_LOCATION, FIELD_TO_RACK, FIELD_TO_ROOM,
};
use stockdesk_domain::{LocationTree, Placement, Result, StockDeskError, StockRecord, TransferRequest};

use crate::stock::StockMutationModel;

pub const MSG_SAME_PLACEMENT: &str = "Destination must be different from source";

/// Transfer rules bound to one fetched hierarchy.
pub struct TransferValidator<'a> {
    tree: &'a LocationTree,
}

impl<'a> TransferValidator<'a> {
    pub fn new(tree: &'a LocationTree) -> Self {
        Self { tree }
    }

    /// Validate `request` against the stock currently held at its source.
    ///
    /// A missing or inconsistent source snapshot, or one for a different
    /// product or placement, is a precondition failure.
    pub fn validate(&self, request: &TransferRequest, source_stock: Option<&StockRecord>) -> Result<()> {
        let source_stock = StockMutationModel::require_snapshot(source_stock)?;

        if source_stock.product_id != request.product_id
            || !source_stock.placement.same_as(&request.source)
        {
            return Err(StockDeskError::Precondition(format!(
                "loaded stock is for {} but the transfer moves {} from {}",
                source_stock.product_id, request.product_id, request.source.location_id
            )));
        }

        self.check(request, source_stock).map_err(StockDeskError::from)
    }

    /// Field rules only; every failing rule is reported.
    pub fn check(&self, request: &TransferRequest, source_stock: &StockRecord) -> ValidationResult<()> {
        let mut validator = Validator::new();
        validator.require_not_blank(FIELD_PRODUCT, &request.product_id, "Product is required");

        if request.is_noop() {
            validator.push(
                FieldError::new(FIELD_TO_LOCATION, MSG_SAME_PLACEMENT).with_code(CODE_SAME_PLACEMENT),
            );
        } else {
            self.check_destination(&mut validator, &request.destination);
        }

        if validator.require_positive(FIELD_QUANTITY, request.quantity, "Quantity must be greater than 0") {
            let available = source_stock.available();
            validator.require_at_most(
                FIELD_QUANTITY,
                request.quantity,
                available,
                CODE_EXCEEDS_AVAILABLE,
                format!("Cannot transfer more than available stock ({available})"),
            );
        }

        validator.finalize()
    }

    fn check_destination(&self, validator: &mut Validator, destination: &Placement) {
        if !validator.require_not_blank(
            FIELD_TO_LOCATION,
            &destination.location_id,
            "Destination location is required",
        ) {
            return;
        }

        let location_id = destination.location_id.trim();
        if self.tree.location(location_id).is_none() {
            validator.push(unknown(FIELD_TO_LOCATION, "Destination location not found", location_id));
            return;
        }

        let room_id = non_blank(destination.room_id.as_deref());
        let rack_id = non_blank(destination.rack_id.as_deref());

        if let Some(room_id) = room_id {
            let in_location = self.tree.room(room_id).is_some_and(|room| room.location == location_id);
            if !in_location {
                validator.push(unknown(
                    FIELD_TO_ROOM,
                    "Room does not belong to the destination location",
                    room_id,
                ));
                return;
            }
        }

        if let Some(rack_id) = rack_id {
            match room_id {
                None => validator.push(
                    FieldError::new(FIELD_TO_RACK, "Select a room before choosing a rack")
                        .with_code("required"),
                ),
                Some(room_id) => {
                    if !self.tree.rack(rack_id).is_some_and(|rack| rack.room == room_id) {
                        validator.push(unknown(
                            FIELD_TO_RACK,
                            "Rack does not belong to the destination room",
                            rack_id,
                        ));
                    }
                }
            }
        }
    }
}

fn non_blank(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|id| !id.is_empty())
}

fn unknown(field: &str, message: &str, id: &str) -> FieldError {
    FieldError::new(field, message).with_code(CODE_UNKNOWN_NODE).with_metadata("id", id)
}
