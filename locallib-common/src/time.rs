//! Timestamp and calendar date utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a calendar date in medium style, e.g. `Oct 19, 2026`
pub fn format_date_med(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format a date as the `YYYY-MM-DD` value expected by `<input type="date">`
pub fn format_date_input(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse an ISO 8601 calendar date
///
/// Accepts a plain date (`2026-10-19`) or a full RFC 3339 timestamp, in which
/// case only the date part in UTC is kept. Impossible dates such as
/// `2023-02-30` are rejected.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}
