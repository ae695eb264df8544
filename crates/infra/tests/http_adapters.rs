//! HTTP adapters against a mock backend, driven through the core services.

mod support;

use std::sync::Arc;

use serde_json::{json, Value};
use stockdesk_core::{
    ApplyOutcome, LocationHierarchySelector, LocationService, StepRegistry, StockMutationService,
    StockService, WorkflowStepController,
};
use stockdesk_domain::{
    HierarchyLevel, ListQuery, MutationIntent, NodeDraft, Placement, StepId, StockAdjustment,
    StockDeskError, StockLevels, StockRecord, TransferRequest,
};
use stockdesk_infra::{HttpLocationDirectory, HttpResourceFetcher, HttpStockService};
use support::{api_client, bearer};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn shelf() -> Placement {
    Placement::at("L1").in_room("R1").on_rack("K1")
}

async fn mount_level(server: &MockServer, quantity: i64, reserved: i64, times: Option<u64>) {
    let mock = Mock::given(method("GET"))
        .and(path("/stock/level"))
        .and(query_param("product", "P1"))
        .and(query_param("location", "L1"))
        .and(query_param("room", "R1"))
        .and(query_param("rack", "K1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"quantity": quantity, "reservedQuantity": reserved})),
        );
    match times {
        Some(n) => mock.up_to_n_times(n).mount(server).await,
        None => mock.mount(server).await,
    }
}

#[tokio::test]
async fn fetch_stock_builds_record_from_level() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/level"))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quantity": 10,
            "reservedQuantity": 2,
            "availableQuantity": 7,
            "lastUpdated": "2024-05-01T10:00:00Z"
        })))
        .mount(&server)
        .await;

    let stock = HttpStockService::new(api_client(&server));
    let record = stock.fetch_stock("P1", &shelf()).await.unwrap().unwrap();

    assert_eq!(record.product_id, "P1");
    assert_eq!(record.placement, shelf());
    assert_eq!(record.available(), 7);
    assert!(record.last_updated.is_some());
}

#[tokio::test]
async fn missing_stock_record_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/level"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "No stock"})))
        .mount(&server)
        .await;

    let stock = HttpStockService::new(api_client(&server));
    assert_eq!(stock.fetch_stock("P1", &Placement::at("L1")).await.unwrap(), None);
}

#[tokio::test]
async fn adjustment_posts_once_and_refetches() {
    let server = MockServer::start().await;
    mount_level(&server, 10, 2, Some(1)).await;
    mount_level(&server, 5, 2, None).await;
    Mock::given(method("POST"))
        .and(path("/stock/adjust"))
        .and(body_json(json!({
            "product": "P1",
            "location": "L1",
            "room": "R1",
            "rack": "K1",
            "adjustmentType": "subtract",
            "quantity": 5,
            "reason": "damaged"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let service = StockMutationService::new(Arc::new(HttpStockService::new(api_client(&server))));
    let seen = StockRecord::new("P1", shelf(), 10).with_reserved(2);
    let ticket = service.begin("adjust").unwrap();

    let adjustment = StockAdjustment::new(MutationIntent::Subtract { quantity: 5 }, "damaged");
    let outcome = service.adjust(&ticket, Some(&seen), &adjustment).await.unwrap();

    assert!(outcome.authoritative);
    assert_eq!(outcome.before.levels(), StockLevels { quantity: 10, reserved_quantity: 2 });
    assert_eq!(outcome.after.levels(), StockLevels { quantity: 5, reserved_quantity: 2 });
}

#[tokio::test]
async fn unavailable_backend_gets_each_adjustment_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stock/adjust"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/stock/adjust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let stock = HttpStockService::new(api_client(&server));
    let adjustment = StockAdjustment::new(MutationIntent::Subtract { quantity: 5 }, "damaged");
    let err = stock.submit_adjustment("P1", &shelf(), &adjustment).await.unwrap_err();

    assert!(matches!(err, StockDeskError::Remote { status: Some(503), .. }));
    let posts = server.received_requests().await.unwrap();
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn rejected_transfer_surfaces_backend_message() {
    let server = MockServer::start().await;
    mount_level(&server, 10, 0, None).await;
    let locations = json!([{"_id": "L1", "name": "Main"}, {"_id": "L2", "name": "Annex"}]);
    Mock::given(method("POST"))
        .and(path("/stock/transfer"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Insufficient stock"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = StockMutationService::new(Arc::new(HttpStockService::new(api_client(&server))));
    let tree = stockdesk_domain::LocationTree {
        locations: serde_json::from_value(locations).unwrap(),
        ..Default::default()
    };
    let seen = StockRecord::new("P1", shelf(), 10);
    let request = TransferRequest::new("P1", shelf(), Placement::at("L2"), 4);
    let ticket = service.begin("transfer").unwrap();

    let err = service.transfer(&ticket, &tree, Some(&seen), &request).await.unwrap_err();
    assert!(matches!(err, StockDeskError::Remote { status: Some(400), .. }));
    assert_eq!(err.user_message(), "Insufficient stock");
}

#[tokio::test]
async fn stock_list_normalises_flat_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"product": {"_id": "P2"}, "location": "L1", "quantity": 3}],
            "page": 2,
            "limit": 1,
            "total": 4,
            "totalPages": 4
        })))
        .mount(&server)
        .await;

    let stock = HttpStockService::new(api_client(&server));
    let page = stock.list_stock(&ListQuery::new(2, 1)).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].product_id, "P2");
    let meta = page.pagination.unwrap();
    assert_eq!((meta.page, meta.total, meta.total_pages), (2, 4, 4));
}

#[tokio::test]
async fn location_tree_accepts_every_collection_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "L1", "name": "Main"},
            {"_id": "L2", "name": "Annex"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rooms": [
            {"_id": "R1", "name": "Cold", "location": {"_id": "L1", "name": "Main"}},
            {"_id": "R3", "name": "Dry", "location": "L2"}
        ]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/racks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"_id": "K1", "name": "A-1", "room": "R1"}
        ]})))
        .mount(&server)
        .await;

    let service = LocationService::new(Arc::new(HttpLocationDirectory::new(api_client(&server))));
    let tree = service.load_tree().await.unwrap();
    assert_eq!((tree.locations.len(), tree.rooms.len(), tree.racks.len()), (2, 2, 1));

    let mut selector = LocationHierarchySelector::new(tree);
    selector.select_location(Some("L1")).unwrap();
    let rooms: Vec<&str> = selector.room_options().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(rooms, ["R1"]);
    selector.select_room(Some("R1")).unwrap();
    assert_eq!(selector.rack_options().len(), 1);
}

#[tokio::test]
async fn creating_a_room_sends_parent_and_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rooms"))
        .and(body_json(json!({"name": "Cold", "location": "L1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Room created",
            "room": {"_id": "R9", "name": "Cold", "location": "L1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = LocationService::new(Arc::new(HttpLocationDirectory::new(api_client(&server))));
    let tree = stockdesk_domain::LocationTree {
        locations: serde_json::from_value(json!([{"_id": "L1", "name": "Main"}])).unwrap(),
        ..Default::default()
    };

    let id = service
        .create(HierarchyLevel::Room, &NodeDraft::named("Cold").under("L1"), &tree)
        .await
        .unwrap();
    assert_eq!(id, "R9");
}

#[tokio::test]
async fn workflow_pages_through_a_remote_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/purchase-orders"))
        .and(query_param("page", "1"))
        .and(query_param("search", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "PO-1"}, {"_id": "PO-2"}],
            "pagination": {"page": 1, "limit": 2, "total": 5, "totalPages": 3}
        })))
        .mount(&server)
        .await;

    let fetcher = HttpResourceFetcher::<Value>::new(api_client(&server));
    let mut controller: WorkflowStepController<Value> =
        WorkflowStepController::new(StepRegistry::dg_sales(), 2);
    controller.set_active_step(StepId(3)).unwrap();
    controller.set_page(2);
    controller.set_search_term("acme");

    assert_eq!(controller.refresh(&fetcher).await, ApplyOutcome::Applied);
    assert_eq!(controller.items().len(), 2);
    assert_eq!(controller.total_items(), 5);
    assert_eq!(controller.total_pages(), 3);
    assert!(!controller.is_degraded());
}

#[tokio::test]
async fn bare_array_degrades_to_client_side_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oems"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}, {"id": 3}])),
        )
        .mount(&server)
        .await;

    let fetcher = HttpResourceFetcher::<Value>::new(api_client(&server));
    let mut controller: WorkflowStepController<Value> =
        WorkflowStepController::new(StepRegistry::dg_sales(), 2);
    controller.set_active_step(StepId(7)).unwrap();

    assert_eq!(controller.refresh(&fetcher).await, ApplyOutcome::Applied);
    assert!(controller.is_degraded());
    assert_eq!(controller.total_items(), 3);
    assert_eq!(controller.total_pages(), 2);
    assert_eq!(controller.state().page, 1);
}

#[tokio::test]
async fn failed_list_fetch_clears_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpResourceFetcher::<Value>::new(api_client(&server));
    let mut controller: WorkflowStepController<Value> =
        WorkflowStepController::new(StepRegistry::dg_sales(), 10);
    controller.set_active_step(StepId(5)).unwrap();

    assert_eq!(controller.refresh(&fetcher).await, ApplyOutcome::Failed);
    assert!(controller.items().is_empty());
    assert!(matches!(
        controller.last_error(),
        Some(StockDeskError::Remote { status: Some(500), .. })
    ));
}
