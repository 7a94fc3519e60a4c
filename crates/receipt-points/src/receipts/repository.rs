use serde::{Deserialize, Serialize};

use super::domain::{Receipt, ReceiptId};

/// Stored receipt plus its memoized point total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub id: ReceiptId,
    pub receipt: Receipt,
    /// `None` until the first successful points query.
    pub points: Option<u64>,
}

impl ReceiptRecord {
    pub fn new(id: ReceiptId, receipt: Receipt) -> Self {
        Self {
            id,
            receipt,
            points: None,
        }
    }
}

/// Storage abstraction shared by every request handler.
pub trait ReceiptRepository: Send + Sync {
    /// Stores a new record. Fails with [`RepositoryError::Conflict`] if the id is taken.
    fn insert(&self, record: ReceiptRecord) -> Result<ReceiptRecord, RepositoryError>;
    fn fetch(&self, id: &ReceiptId) -> Result<Option<ReceiptRecord>, RepositoryError>;
    /// Saves computed points unless a value is already present, and returns whichever
    /// value ends up stored.
    fn record_points(&self, id: &ReceiptId, points: u64) -> Result<u64, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
