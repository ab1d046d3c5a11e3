//! Store access for the catalog
//!
//! One module per record table. Functions take the pool explicitly and return
//! `locallib_common::Result`, leaving HTTP concerns to the handlers.

pub mod authors;
pub mod books;
pub mod copies;
pub mod genres;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use locallib_common::time::{format_date_input, parse_iso_date};
use locallib_common::{Error, Result};

/// Encode an optional calendar date as stored text
pub(crate) fn date_to_text(date: Option<NaiveDate>) -> Option<String> {
    date.map(format_date_input)
}

/// Decode an optional calendar date column
pub(crate) fn date_from_text(column: &str, value: Option<String>) -> Result<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(text) if text.is_empty() => Ok(None),
        Some(text) => parse_iso_date(&text)
            .map(Some)
            .ok_or_else(|| Error::corrupt(column, &text)),
    }
}

/// Decode a timestamp column written either by us (RFC 3339) or by a
/// `CURRENT_TIMESTAMP` default (`YYYY-MM-DD HH:MM:SS`, UTC)
pub(crate) fn timestamp_from_text(column: &str, text: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| Error::corrupt(column, text))
}
