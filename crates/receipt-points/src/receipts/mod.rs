//! Receipt intake and loyalty points scoring.
//!
//! Receipts are stored verbatim at registration. Amount, date, and time fields are only
//! interpreted when points are first requested, so a malformed receipt registers fine and
//! fails at scoring time with the rule that could not read it.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Item, Receipt, ReceiptId};
pub use repository::{ReceiptRecord, ReceiptRepository, RepositoryError};
pub use router::receipt_router;
pub use scoring::{
    EvaluationMode, PointsBreakdown, PointsEngine, RuleContribution, ScoringError, ScoringRule,
};
pub use service::{ReceiptService, ReceiptServiceError};
