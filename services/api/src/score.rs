use crate::infra::InMemoryReceiptRepository;
use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{
    EvaluationMode, PointsBreakdown, PointsEngine, Receipt, ReceiptRecord, ReceiptService,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    pub(crate) path: PathBuf,
    /// Evaluate rules one after another instead of in parallel
    #[arg(long)]
    pub(crate) sequential: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.path)?;
    let receipt: Receipt = serde_json::from_str(&raw)?;

    let mode = if args.sequential {
        EvaluationMode::Sequential
    } else {
        EvaluationMode::Parallel
    };

    let (record, breakdown, points) = score_receipt(receipt, mode)?;
    print!("{}", render_breakdown(&record, &breakdown, points));
    Ok(())
}

fn score_receipt(
    receipt: Receipt,
    mode: EvaluationMode,
) -> Result<(ReceiptRecord, PointsBreakdown, u64), AppError> {
    let service = ReceiptService::new(
        Arc::new(InMemoryReceiptRepository::default()),
        PointsEngine::new(mode),
    );

    let record = service.register(receipt)?;
    let breakdown = service.breakdown(&record.id)?;
    let points = service.points(&record.id)?;
    Ok((record, breakdown, points))
}

fn render_breakdown(record: &ReceiptRecord, breakdown: &PointsBreakdown, points: u64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Receipt {} from '{}' ({} {})\n",
        record.id, record.receipt.retailer, record.receipt.purchase_date, record.receipt.purchase_time
    ));
    out.push_str("\nRule contributions\n");
    for component in &breakdown.components {
        out.push_str(&format!(
            "- {:<20} {:>5}\n",
            component.rule.label(),
            component.points
        ));
    }
    out.push_str(&format!("\nTotal points: {points}\n"));
    out
}
