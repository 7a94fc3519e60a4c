use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{Item, Receipt, ReceiptId};
use crate::receipts::repository::{ReceiptRecord, ReceiptRepository, RepositoryError};
use crate::receipts::scoring::{EvaluationMode, PointsEngine};
use crate::receipts::{receipt_router, ReceiptService};

pub(super) fn item(description: &str, price: &str) -> Item {
    Item {
        short_description: description.to_string(),
        price: price.to_string(),
    }
}

pub(super) fn receipt() -> Receipt {
    Receipt {
        retailer: "$Walmart/   ".to_string(),
        purchase_date: "2020-01-01".to_string(),
        purchase_time: "15:00".to_string(),
        items: vec![
            item("Item 1", "10.00"),
            item("Item 2", "10.87"),
            item("Item 3", "1.00"),
        ],
        total: "100.00".to_string(),
    }
}

pub(super) fn retailer_only_receipt() -> Receipt {
    Receipt {
        retailer: " retailer name example-2 ".to_string(),
        purchase_date: "2020-01-02".to_string(),
        purchase_time: "12:00".to_string(),
        items: Vec::new(),
        total: "100.01".to_string(),
    }
}

pub(super) fn zero_point_receipt() -> Receipt {
    Receipt {
        retailer: "&&&".to_string(),
        purchase_date: "2020-01-02".to_string(),
        purchase_time: "09:30".to_string(),
        items: Vec::new(),
        total: "0.00".to_string(),
    }
}

pub(super) fn engine(mode: EvaluationMode) -> PointsEngine {
    PointsEngine::new(mode)
}

pub(super) fn build_service() -> (ReceiptService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ReceiptService::new(repository.clone(), PointsEngine::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ReceiptId, ReceiptRecord>>>,
    pub(super) point_writes: Arc<AtomicUsize>,
}

impl MemoryRepository {
    /// Swaps the stored receipt, bypassing the service.
    pub(super) fn replace_receipt(&self, id: &ReceiptId, receipt: Receipt) {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if let Some(record) = guard.get_mut(id) {
            record.receipt = receipt;
        }
    }

    pub(super) fn point_writes(&self) -> usize {
        self.point_writes.load(Ordering::SeqCst)
    }
}

impl ReceiptRepository for MemoryRepository {
    fn insert(&self, record: ReceiptRecord) -> Result<ReceiptRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ReceiptId) -> Result<Option<ReceiptRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn record_points(&self, id: &ReceiptId, points: u64) -> Result<u64, RepositoryError> {
        self.point_writes.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(*record.points.get_or_insert(points))
    }
}

pub(super) struct ConflictRepository;

impl ReceiptRepository for ConflictRepository {
    fn insert(&self, _record: ReceiptRecord) -> Result<ReceiptRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &ReceiptId) -> Result<Option<ReceiptRecord>, RepositoryError> {
        Ok(None)
    }

    fn record_points(&self, _id: &ReceiptId, _points: u64) -> Result<u64, RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl ReceiptRepository for UnavailableRepository {
    fn insert(&self, _record: ReceiptRecord) -> Result<ReceiptRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ReceiptId) -> Result<Option<ReceiptRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_points(&self, _id: &ReceiptId, _points: u64) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn receipt_router_with_service(service: ReceiptService<MemoryRepository>) -> axum::Router {
    receipt_router(Arc::new(service))
}
