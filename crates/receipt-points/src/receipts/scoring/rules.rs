use serde::{Deserialize, Serialize};

use super::super::domain::{Item, Receipt};
use super::amount::Amount;
use super::calendar::{is_odd_day, is_within_window, parse_purchase_date, parse_purchase_time};
use super::ScoringError;

const POINTS_PER_ALPHANUMERIC: u64 = 1;
const POINTS_FOR_ROUND_TOTAL: u64 = 50;
const POINTS_FOR_QUARTER_MULTIPLE: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const POINTS_FOR_ODD_DAY: u64 = 6;
const POINTS_FOR_AFTERNOON: u64 = 10;

const QUARTER_CENTS: u64 = 25;
const DESCRIPTION_LENGTH_DIVISOR: usize = 3;
/// Price multiplier for qualifying descriptions, as a fraction (0.2).
const DESCRIPTION_PRICE_FACTOR: (u64, u64) = (1, 5);

const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;

/// The seven independent scoring rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerName,
    RoundTotal,
    QuarterMultiple,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl ScoringRule {
    pub const ALL: [ScoringRule; 7] = [
        ScoringRule::RetailerName,
        ScoringRule::RoundTotal,
        ScoringRule::QuarterMultiple,
        ScoringRule::ItemPairs,
        ScoringRule::DescriptionLength,
        ScoringRule::OddPurchaseDay,
        ScoringRule::AfternoonPurchase,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScoringRule::RetailerName => "retailer_name",
            ScoringRule::RoundTotal => "round_total",
            ScoringRule::QuarterMultiple => "quarter_multiple",
            ScoringRule::ItemPairs => "item_pairs",
            ScoringRule::DescriptionLength => "description_length",
            ScoringRule::OddPurchaseDay => "odd_purchase_day",
            ScoringRule::AfternoonPurchase => "afternoon_purchase",
        }
    }

    pub fn evaluate(self, receipt: &Receipt) -> Result<u64, ScoringError> {
        match self {
            ScoringRule::RetailerName => Ok(retailer_name(&receipt.retailer)),
            ScoringRule::RoundTotal => round_total(&receipt.total),
            ScoringRule::QuarterMultiple => quarter_multiple(&receipt.total),
            ScoringRule::ItemPairs => Ok(item_pairs(&receipt.items)),
            ScoringRule::DescriptionLength => description_length(&receipt.items),
            ScoringRule::OddPurchaseDay => odd_purchase_day(&receipt.purchase_date),
            ScoringRule::AfternoonPurchase => afternoon_purchase(&receipt.purchase_time),
        }
    }
}

fn retailer_name(retailer: &str) -> u64 {
    retailer.chars().filter(|c| c.is_alphanumeric()).count() as u64 * POINTS_PER_ALPHANUMERIC
}

fn parse_amount(rule: ScoringRule, raw: &str) -> Result<Amount, ScoringError> {
    raw.parse().map_err(|_| ScoringError::MalformedAmount {
        rule,
        value: raw.to_string(),
    })
}

fn round_total(total: &str) -> Result<u64, ScoringError> {
    let total = parse_amount(ScoringRule::RoundTotal, total)?;
    if total.is_positive() && total.is_round() {
        Ok(POINTS_FOR_ROUND_TOTAL)
    } else {
        Ok(0)
    }
}

fn quarter_multiple(total: &str) -> Result<u64, ScoringError> {
    let total = parse_amount(ScoringRule::QuarterMultiple, total)?;
    if total.is_positive() && total.is_multiple_of(QUARTER_CENTS) {
        Ok(POINTS_FOR_QUARTER_MULTIPLE)
    } else {
        Ok(0)
    }
}

fn item_pairs(items: &[Item]) -> u64 {
    (items.len() / 2) as u64 * POINTS_PER_ITEM_PAIR
}

fn description_length(items: &[Item]) -> Result<u64, ScoringError> {
    let (numerator, denominator) = DESCRIPTION_PRICE_FACTOR;
    let mut points: u64 = 0;

    for item in items {
        let length = item.short_description.trim().chars().count();
        if length == 0 || length % DESCRIPTION_LENGTH_DIVISOR != 0 {
            continue;
        }

        let price = parse_amount(ScoringRule::DescriptionLength, &item.price)?;
        points = points
            .checked_add(price.scaled_units_ceil(numerator, denominator))
            .ok_or(ScoringError::PointsOverflow {
                rule: ScoringRule::DescriptionLength,
            })?;
    }

    Ok(points)
}

fn odd_purchase_day(purchase_date: &str) -> Result<u64, ScoringError> {
    let date =
        parse_purchase_date(purchase_date).map_err(|source| ScoringError::MalformedDate {
            value: purchase_date.to_string(),
            source,
        })?;

    Ok(if is_odd_day(date) { POINTS_FOR_ODD_DAY } else { 0 })
}

fn afternoon_purchase(purchase_time: &str) -> Result<u64, ScoringError> {
    let time =
        parse_purchase_time(purchase_time).map_err(|source| ScoringError::MalformedTime {
            value: purchase_time.to_string(),
            source,
        })?;

    if is_within_window(time, AFTERNOON_START_HOUR, AFTERNOON_END_HOUR) {
        Ok(POINTS_FOR_AFTERNOON)
    } else {
        Ok(0)
    }
}
