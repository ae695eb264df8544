//! Adjustment and transfer flows against an in-memory stock backend.

mod support;

use std::sync::Arc;

use stockdesk_core::{StockMutationService, TransferValidator};
use stockdesk_domain::constants::FIELD_TO_LOCATION;
use stockdesk_domain::{
    MutationIntent, Placement, Reservation, ReservationType, StockAdjustment, StockDeskError,
    StockLevels, StockRecord, TransferRequest,
};
use support::stock::MockStockService;
use support::{sample_tree, shelf_k1};

fn seeded(quantity: i64, reserved: i64) -> (Arc<MockStockService>, StockRecord) {
    let record = StockRecord::new("P1", shelf_k1(), quantity).with_reserved(reserved);
    (Arc::new(MockStockService::new(vec![record.clone()])), record)
}

#[tokio::test]
async fn subtract_returns_authoritative_outcome() {
    let (backend, seen) = seeded(10, 2);
    let service = StockMutationService::new(backend.clone());

    let ticket = service.begin("adjust").unwrap();
    let adjustment = StockAdjustment::new(MutationIntent::Subtract { quantity: 5 }, "damaged");
    let outcome = service.adjust(&ticket, Some(&seen), &adjustment).await.unwrap();

    assert!(outcome.authoritative);
    assert_eq!(outcome.before.levels(), StockLevels { quantity: 10, reserved_quantity: 2 });
    assert_eq!(outcome.after.levels(), StockLevels { quantity: 5, reserved_quantity: 2 });
    assert_eq!(backend.adjustments(), vec![adjustment]);
}

#[tokio::test]
async fn invalid_adjustment_never_reaches_backend() {
    let (backend, seen) = seeded(10, 2);
    let service = StockMutationService::new(backend.clone());
    let ticket = service.begin("adjust").unwrap();

    let adjustment = StockAdjustment::new(MutationIntent::Subtract { quantity: 11 }, "");
    let err = service.adjust(&ticket, Some(&seen), &adjustment).await.unwrap_err();

    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.error_count(), 2);
    assert_eq!(
        errors.first_for("quantity").unwrap().message,
        "Cannot subtract more than current stock (10)"
    );
    assert_eq!(backend.fetch_count(), 0);
    assert!(backend.adjustments().is_empty());
}

#[tokio::test]
async fn concurrent_change_is_reported_as_stale() {
    let (backend, seen) = seeded(10, 2);
    backend.script_fetch(Ok(Some(StockRecord::new("P1", shelf_k1(), 10).with_reserved(9))));
    let service = StockMutationService::new(backend.clone());
    let ticket = service.begin("adjust").unwrap();

    let reserve = StockAdjustment::new(
        MutationIntent::Reserve {
            quantity: 4,
            reservation: Some(Reservation::new(ReservationType::Service)),
        },
        "service job",
    );
    let err = service.adjust(&ticket, Some(&seen), &reserve).await.unwrap_err();

    match err {
        StockDeskError::StaleState(message) => {
            assert_eq!(message, "Cannot reserve more than available stock (1)")
        }
        other => panic!("expected stale state, got {other:?}"),
    }
    assert!(backend.adjustments().is_empty());
}

#[tokio::test]
async fn missing_snapshot_requires_refetch() {
    let (backend, _) = seeded(10, 0);
    let service = StockMutationService::new(backend);
    let ticket = service.begin("adjust").unwrap();

    let adjustment = StockAdjustment::new(MutationIntent::Add { quantity: 1 }, "found");
    let err = service.adjust(&ticket, None, &adjustment).await.unwrap_err();
    assert!(matches!(err, StockDeskError::Precondition(_)));
}

#[tokio::test]
async fn failed_refetch_falls_back_to_speculative_apply() {
    let (backend, seen) = seeded(10, 2);
    let service = StockMutationService::new(backend.clone());
    let ticket = service.begin("adjust").unwrap();

    // first fetch is the pre-submit check, second the post-submit refetch
    backend.script_fetch(Ok(Some(seen.clone())));
    backend.script_fetch(Err(StockDeskError::Network("timed out".into())));

    let adjustment = StockAdjustment::new(MutationIntent::Set { quantity: 1 }, "recount");
    let outcome = service.adjust(&ticket, Some(&seen), &adjustment).await.unwrap();

    assert!(!outcome.authoritative);
    assert_eq!(outcome.after.levels(), StockLevels { quantity: 1, reserved_quantity: 1 });
}

#[tokio::test]
async fn remote_rejection_keeps_message() {
    let (backend, seen) = seeded(10, 0);
    backend.fail_next_submit(StockDeskError::Remote {
        status: Some(400),
        message: "Product is archived".into(),
    });
    let service = StockMutationService::new(backend);
    let ticket = service.begin("adjust").unwrap();

    let adjustment = StockAdjustment::new(MutationIntent::Add { quantity: 1 }, "found");
    let err = service.adjust(&ticket, Some(&seen), &adjustment).await.unwrap_err();
    assert_eq!(err.user_message(), "Product is archived");
}

#[tokio::test]
async fn second_form_is_busy_and_dropped_ticket_is_rejected() {
    let (backend, seen) = seeded(10, 0);
    let service = StockMutationService::new(backend);

    let ticket = service.begin("adjust").unwrap();
    assert!(matches!(service.begin("transfer"), Err(StockDeskError::Busy(_))));

    let other_service = StockMutationService::new(Arc::new(MockStockService::default()));
    let foreign = other_service.begin("adjust").unwrap();
    let adjustment = StockAdjustment::new(MutationIntent::Add { quantity: 1 }, "found");
    let err = service.adjust(&foreign, Some(&seen), &adjustment).await.unwrap_err();
    assert!(matches!(err, StockDeskError::Precondition(_)));

    drop(ticket);
    assert!(service.begin("transfer").is_ok());
}

#[tokio::test]
async fn transfer_moves_stock_between_racks() {
    let (backend, seen) = seeded(10, 5);
    let tree = sample_tree();
    let service = StockMutationService::new(backend.clone());
    let ticket = service.begin("transfer").unwrap();

    let destination = Placement::at("L1").in_room("R1").on_rack("K2");
    let request = TransferRequest::new("P1", shelf_k1(), destination.clone(), 3);
    let outcome = service.transfer(&ticket, &tree, Some(&seen), &request).await.unwrap();

    assert!(outcome.authoritative);
    assert_eq!(outcome.after.quantity, 7);
    assert_eq!(backend.get("P1", &destination).unwrap().quantity, 3);
    assert_eq!(backend.transfers().len(), 1);
}

#[tokio::test]
async fn transfer_to_same_placement_is_rejected_locally() {
    let (backend, seen) = seeded(10, 0);
    let tree = sample_tree();
    let service = StockMutationService::new(backend.clone());
    let ticket = service.begin("transfer").unwrap();

    let request = TransferRequest::new("P1", shelf_k1(), shelf_k1(), 1);
    let err = service.transfer(&ticket, &tree, Some(&seen), &request).await.unwrap_err();

    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.error_count(), 1);
    assert_eq!(
        errors.first_for(FIELD_TO_LOCATION).unwrap().message,
        "Destination must be different from source"
    );
    assert!(backend.transfers().is_empty());
}

#[tokio::test]
async fn transfer_beyond_fresh_availability_is_stale() {
    let (backend, seen) = seeded(10, 0);
    backend.script_fetch(Ok(Some(StockRecord::new("P1", shelf_k1(), 2))));
    let tree = sample_tree();
    let service = StockMutationService::new(backend.clone());
    let ticket = service.begin("transfer").unwrap();

    let request = TransferRequest::new("P1", shelf_k1(), Placement::at("L2"), 5);
    let err = service.transfer(&ticket, &tree, Some(&seen), &request).await.unwrap_err();
    assert!(matches!(err, StockDeskError::StaleState(_)));
    assert!(err.requires_refetch());
}

#[test]
fn transfer_noop_rejection_is_exact() {
    let tree = sample_tree();
    let validator = TransferValidator::new(&tree);
    let source = shelf_k1();
    let stock = StockRecord::new("P1", source.clone(), 10);

    let variants = [
        Placement::at("L1").in_room("R1").on_rack("K2"),
        Placement::at("L1").in_room("R1"),
        Placement::at("L1").in_room("R2"),
        Placement::at("L2").in_room("R3").on_rack("K3"),
    ];
    for destination in variants {
        let request = TransferRequest::new("P1", source.clone(), destination.clone(), 1);
        assert!(validator.validate(&request, Some(&stock)).is_ok(), "{destination:?}");
    }

    let request = TransferRequest::new("P1", source.clone(), source, 1);
    assert!(validator.validate(&request, Some(&stock)).is_err());
}
