//! Field sanitizers and custom validator functions
//!
//! Sanitizers rewrite a raw submitted value and never fail. The validator
//! functions plug into `#[validate(custom(...))]` on the form structs and
//! report a failure by error code; each form maps codes to messages.

use locallib_common::time::parse_iso_date;
use locallib_common::uuid_utils;
use validator::ValidationError;

/// Error code for an empty value
pub const BLANK: &str = "blank";
/// Error code for a value with characters other than letters and digits
pub const NOT_ALPHANUMERIC: &str = "alphanumeric";
/// Error code for a value that is not an ISO 8601 calendar date
pub const NOT_A_DATE: &str = "date";
/// Error code for a value that is not a record id
pub const NOT_AN_ID: &str = "record_id";
/// Code the `length` validator reports
pub const LENGTH: &str = "length";

/// Replace characters that are significant in HTML with entities
///
/// Covers `& < > " ' / \` and the backtick, so the result is safe both as
/// element text and inside a quoted attribute.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim, then escape: the value as it will be stored
pub fn sanitize(raw: &str) -> String {
    escape(raw.trim())
}

/// Trim only, for values that are parsed rather than stored as text
pub fn trimmed(raw: &str) -> String {
    raw.trim().to_string()
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(BLANK));
    }
    Ok(())
}

/// Letters and digits only; an empty value is left to [`not_blank`]
pub fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(char::is_alphanumeric) {
        Ok(())
    } else {
        Err(ValidationError::new(NOT_ALPHANUMERIC))
    }
}

/// Empty, or a valid ISO 8601 calendar date
pub fn optional_iso_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_iso_date(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new(NOT_A_DATE))
    }
}

/// Empty, or a parseable record id
pub fn optional_record_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || uuid_utils::parse(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new(NOT_AN_ID))
    }
}

/// Every non-empty value is a parseable record id
pub fn record_ids(values: &[String]) -> Result<(), ValidationError> {
    values
        .iter()
        .try_for_each(|value| optional_record_id(value))
}
