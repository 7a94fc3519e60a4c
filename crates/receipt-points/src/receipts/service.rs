use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{Receipt, ReceiptId};
use super::repository::{ReceiptRecord, ReceiptRepository, RepositoryError};
use super::scoring::{PointsBreakdown, PointsEngine, ScoringError};

/// Service composing the repository and the points engine.
pub struct ReceiptService<R> {
    repository: Arc<R>,
    engine: PointsEngine,
}

impl<R> ReceiptService<R>
where
    R: ReceiptRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: PointsEngine) -> Self {
        Self { repository, engine }
    }

    /// Store a receipt under a freshly generated id.
    ///
    /// Fields are not interpreted here; malformed values surface on the first points query.
    pub fn register(&self, receipt: Receipt) -> Result<ReceiptRecord, ReceiptServiceError> {
        let record = ReceiptRecord::new(ReceiptId::generate(), receipt);
        let stored = self.repository.insert(record)?;
        info!(receipt_id = %stored.id, items = stored.receipt.items.len(), "receipt registered");
        Ok(stored)
    }

    /// Points for a registered receipt, computed on first request and cached afterwards.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        let record = self.fetch(id)?;

        if let Some(points) = record.points {
            debug!(receipt_id = %id, points, "points served from cache");
            return Ok(points);
        }

        let breakdown = self.score(&record)?;
        let stored = self.repository.record_points(id, breakdown.total)?;
        info!(receipt_id = %id, points = stored, "points computed");
        Ok(stored)
    }

    /// Per-rule contributions for a registered receipt. Never touches the cache.
    pub fn breakdown(&self, id: &ReceiptId) -> Result<PointsBreakdown, ReceiptServiceError> {
        let record = self.fetch(id)?;
        self.score(&record)
    }

    fn fetch(&self, id: &ReceiptId) -> Result<ReceiptRecord, ReceiptServiceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| ReceiptServiceError::NotFound(id.clone()))
    }

    fn score(&self, record: &ReceiptRecord) -> Result<PointsBreakdown, ReceiptServiceError> {
        self.engine.score(&record.receipt).map_err(|err| {
            warn!(
                receipt_id = %record.id,
                rule = err.rule().label(),
                error = %err,
                "receipt could not be scored"
            );
            ReceiptServiceError::Scoring(err)
        })
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error("no receipt found for id {0}")]
    NotFound(ReceiptId),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
