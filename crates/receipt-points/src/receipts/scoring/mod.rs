mod amount;
mod calendar;
mod rules;

pub use amount::{Amount, AmountParseError};
pub use calendar::CalendarError;
pub use rules::ScoringRule;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::Receipt;

/// Scheduling policy for the rule set. Both modes produce identical results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    #[default]
    Parallel,
    Sequential,
}

/// Stateless evaluator summing every [`ScoringRule`] for a receipt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsEngine {
    mode: EvaluationMode,
}

impl PointsEngine {
    pub fn new(mode: EvaluationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Evaluates all rules and sums them.
    ///
    /// Each rule writes only its own slot; slots are read back in rule order so the
    /// reported error is always the lowest-index failure, regardless of scheduling.
    pub fn score(&self, receipt: &Receipt) -> Result<PointsBreakdown, ScoringError> {
        let slots: Vec<Result<u64, ScoringError>> = match self.mode {
            EvaluationMode::Parallel => ScoringRule::ALL[..]
                .par_iter()
                .map(|rule| rule.evaluate(receipt))
                .collect(),
            EvaluationMode::Sequential => ScoringRule::ALL
                .iter()
                .map(|rule| rule.evaluate(receipt))
                .collect(),
        };

        let mut components = Vec::with_capacity(ScoringRule::ALL.len());
        for (rule, slot) in ScoringRule::ALL.into_iter().zip(slots) {
            let points = slot?;
            components.push(RuleContribution { rule, points });
        }

        let breakdown = PointsBreakdown::from_components(components)?;
        debug!(total = breakdown.total, mode = ?self.mode, "receipt scored");
        Ok(breakdown)
    }
}

/// Points awarded by one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: ScoringRule,
    pub points: u64,
}

/// Per-rule contributions and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub total: u64,
    pub components: Vec<RuleContribution>,
}

impl PointsBreakdown {
    fn from_components(components: Vec<RuleContribution>) -> Result<Self, ScoringError> {
        let mut total: u64 = 0;
        for component in &components {
            total = total
                .checked_add(component.points)
                .ok_or(ScoringError::PointsOverflow {
                    rule: component.rule,
                })?;
        }
        Ok(Self { total, components })
    }

    pub fn points_for(&self, rule: ScoringRule) -> Option<u64> {
        self.components
            .iter()
            .find(|component| component.rule == rule)
            .map(|component| component.points)
    }
}

/// A receipt field could not be read by the rule that needs it, or the points it
/// yields do not fit in a `u64`.
///
/// Stored receipts never change, so retrying yields the same error.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("{} rule could not parse amount '{value}'", .rule.label())]
    MalformedAmount { rule: ScoringRule, value: String },
    #[error("purchase date '{value}' is not YYYY-MM-DD")]
    MalformedDate {
        value: String,
        #[source]
        source: CalendarError,
    },
    #[error("purchase time '{value}' is not HH:MM")]
    MalformedTime {
        value: String,
        #[source]
        source: CalendarError,
    },
    #[error("points overflowed while adding the {} rule", .rule.label())]
    PointsOverflow { rule: ScoringRule },
}

impl ScoringError {
    pub fn rule(&self) -> ScoringRule {
        match self {
            ScoringError::MalformedAmount { rule, .. } | ScoringError::PointsOverflow { rule } => {
                *rule
            }
            ScoringError::MalformedDate { .. } => ScoringRule::OddPurchaseDay,
            ScoringError::MalformedTime { .. } => ScoringRule::AfternoonPurchase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_total_rejects_overflowing_sums() {
        let components = vec![
            RuleContribution {
                rule: ScoringRule::RetailerName,
                points: 7,
            },
            RuleContribution {
                rule: ScoringRule::DescriptionLength,
                points: u64::MAX - 3,
            },
        ];

        match PointsBreakdown::from_components(components) {
            Err(ScoringError::PointsOverflow { rule }) => {
                assert_eq!(rule, ScoringRule::DescriptionLength)
            }
            other => panic!("expected overflow, got {other:?}"),
        }
    }
}
