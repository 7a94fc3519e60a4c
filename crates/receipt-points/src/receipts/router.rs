use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use super::domain::{Receipt, ReceiptId};
use super::repository::ReceiptRepository;
use super::service::ReceiptService;
use crate::error::AppError;

/// Router builder exposing receipt registration and points lookup.
pub fn receipt_router<R>(service: Arc<ReceiptService<R>>) -> Router
where
    R: ReceiptRepository + 'static,
{
    Router::new()
        .route("/api/v1/receipts/process", post(process_handler::<R>))
        .route(
            "/api/v1/receipts/:receipt_id/points",
            get(points_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn process_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    axum::Json(receipt): axum::Json<Receipt>,
) -> Result<axum::Json<Value>, AppError>
where
    R: ReceiptRepository + 'static,
{
    let record = service.register(receipt)?;
    Ok(axum::Json(json!({ "id": record.id })))
}

pub(crate) async fn points_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    Path(receipt_id): Path<String>,
) -> Result<axum::Json<Value>, AppError>
where
    R: ReceiptRepository + 'static,
{
    let points = service.points(&ReceiptId(receipt_id))?;
    Ok(axum::Json(json!({ "points": points })))
}
