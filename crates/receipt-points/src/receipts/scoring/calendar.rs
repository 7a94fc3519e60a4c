use chrono::{Datelike, NaiveDate, NaiveTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LAYOUT: &str = "YYYY-MM-DD";
const TIME_FORMAT: &str = "%H:%M";
const TIME_LAYOUT: &str = "HH:MM";

/// Why a date or time field was rejected.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("expected the zero-padded layout {0}")]
    Layout(&'static str),
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// chrono accepts unpadded `%m`/`%d`/`%H` fields, so the fixed layout is checked first.
fn matches_layout(raw: &str, layout: &str) -> bool {
    raw.len() == layout.len()
        && raw.bytes().zip(layout.bytes()).all(|(value, pattern)| {
            if pattern.is_ascii_alphabetic() {
                value.is_ascii_digit()
            } else {
                value == pattern
            }
        })
}

pub fn parse_purchase_date(raw: &str) -> Result<NaiveDate, CalendarError> {
    if !matches_layout(raw, DATE_LAYOUT) {
        return Err(CalendarError::Layout(DATE_LAYOUT));
    }
    Ok(NaiveDate::parse_from_str(raw, DATE_FORMAT)?)
}

pub fn parse_purchase_time(raw: &str) -> Result<NaiveTime, CalendarError> {
    if !matches_layout(raw, TIME_LAYOUT) {
        return Err(CalendarError::Layout(TIME_LAYOUT));
    }
    Ok(NaiveTime::parse_from_str(raw, TIME_FORMAT)?)
}

pub fn is_odd_day(date: NaiveDate) -> bool {
    date.day() % 2 == 1
}

/// Inclusive on both ends: `start_hour:00 <= time <= end_hour:00`.
pub fn is_within_window(time: NaiveTime, start_hour: u32, end_hour: u32) -> bool {
    let bounds = (
        NaiveTime::from_hms_opt(start_hour, 0, 0),
        NaiveTime::from_hms_opt(end_hour, 0, 0),
    );
    match bounds {
        (Some(start), Some(end)) => start <= time && time <= end,
        _ => false,
    }
}
