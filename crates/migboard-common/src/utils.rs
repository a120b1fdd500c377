//! Month parsing and numeric helpers shared across crates.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};

/// Date formats accepted for the `month` column, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Datetime formats accepted for the `month` column, tried in order.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a month value, keeping only the date part.
///
/// Accepts plain dates, `YYYY-MM`, naive datetimes and RFC 3339 timestamps.
pub fn parse_month(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d").ok())
}

/// Formats a month date the way it is written to CSV.
pub fn format_month(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns the month `offset` months after `start`.
pub fn add_months(start: NaiveDate, offset: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(offset))
}

/// Rounds `value` to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
