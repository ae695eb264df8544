use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use stockdesk_core::stock::ports::StockService;
use stockdesk_core::StockMutationModel;
use stockdesk_domain::{
    ListQuery, MutationIntent, Page, Placement, Result as DomainResult, StockAdjustment,
    StockDeskError, StockMovement, StockRecord, TransferRequest,
};

type Key = (String, Placement);

/// In-memory mock for `StockService`.
///
/// Behaves like a well-mannered backend: submits are applied to the stored
/// records. Individual fetch or submit results can be scripted to simulate
/// concurrent changes and failures.
#[derive(Default)]
pub struct MockStockService {
    records: Mutex<HashMap<Key, StockRecord>>,
    scripted_fetches: Mutex<VecDeque<DomainResult<Option<StockRecord>>>>,
    submit_failure: Mutex<Option<StockDeskError>>,
    submitted_adjustments: Mutex<Vec<StockAdjustment>>,
    submitted_transfers: Mutex<Vec<TransferRequest>>,
    fetch_count: Mutex<usize>,
}

impl MockStockService {
    pub fn new(records: Vec<StockRecord>) -> Self {
        let mock = Self::default();
        for record in records {
            mock.put(record);
        }
        mock
    }

    pub fn put(&self, record: StockRecord) {
        let key = (record.product_id.clone(), record.placement.clone());
        self.records.lock().unwrap().insert(key, record);
    }

    pub fn get(&self, product_id: &str, placement: &Placement) -> Option<StockRecord> {
        self.records.lock().unwrap().get(&(product_id.to_string(), placement.clone())).cloned()
    }

    /// Next `fetch_stock` call returns `result` instead of the stored record.
    pub fn script_fetch(&self, result: DomainResult<Option<StockRecord>>) {
        self.scripted_fetches.lock().unwrap().push_back(result);
    }

    pub fn fail_next_submit(&self, error: StockDeskError) {
        *self.submit_failure.lock().unwrap() = Some(error);
    }

    pub fn adjustments(&self) -> Vec<StockAdjustment> {
        self.submitted_adjustments.lock().unwrap().clone()
    }

    pub fn transfers(&self) -> Vec<TransferRequest> {
        self.submitted_transfers.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetch_count.lock().unwrap()
    }

    fn take_failure(&self) -> Option<StockDeskError> {
        self.submit_failure.lock().unwrap().take()
    }
}

#[async_trait]
impl StockService for MockStockService {
    async fn fetch_stock(
        &self,
        product_id: &str,
        placement: &Placement,
    ) -> DomainResult<Option<StockRecord>> {
        *self.fetch_count.lock().unwrap() += 1;
        if let Some(scripted) = self.scripted_fetches.lock().unwrap().pop_front() {
            return scripted;
        }
        Ok(self.get(product_id, placement))
    }

    async fn submit_adjustment(
        &self,
        product_id: &str,
        placement: &Placement,
        adjustment: &StockAdjustment,
    ) -> DomainResult<()> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.submitted_adjustments.lock().unwrap().push(adjustment.clone());
        if let Some(current) = self.get(product_id, placement) {
            self.put(StockMutationModel::apply(&current, &adjustment.intent));
        }
        Ok(())
    }

    async fn submit_transfer(&self, request: &TransferRequest) -> DomainResult<()> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.submitted_transfers.lock().unwrap().push(request.clone());

        if let Some(source) = self.get(&request.product_id, &request.source) {
            self.put(StockMutationModel::apply(
                &source,
                &MutationIntent::Subtract { quantity: request.quantity },
            ));
        }
        let destination = self
            .get(&request.product_id, &request.destination)
            .unwrap_or_else(|| StockRecord::new(&request.product_id, request.destination.clone(), 0));
        self.put(StockMutationModel::apply(
            &destination,
            &MutationIntent::Add { quantity: request.quantity },
        ));
        Ok(())
    }

    async fn list_stock(&self, query: &ListQuery) -> DomainResult<Page<StockRecord>> {
        let mut items: Vec<StockRecord> = self.records.lock().unwrap().values().cloned().collect();
        items.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        let start = ((query.page - 1) * query.limit) as usize;
        Ok(Page::unpaginated(items.into_iter().skip(start).take(query.limit as usize).collect()))
    }

    async fn list_movements(&self, _query: &ListQuery) -> DomainResult<Page<StockMovement>> {
        Ok(Page::empty())
    }
}
