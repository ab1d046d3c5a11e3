//! Form validation and sanitization
//!
//! Every submitted value is sanitized first (trimmed, and escaped when it is
//! stored as text). The sanitized form struct is then checked with
//! `validator`, so bounds apply to the value that is actually stored. Each
//! entity form in [`forms`] turns the outcome into either a typed draft or an
//! [`Invalid`] carrying the values to echo back.

pub mod forms;
pub mod rules;

use validator::{Validate, ValidationErrors};

pub use rules::escape;

/// Raw submitted form fields in arrival order
///
/// Names may repeat (checkbox groups submit one pair per checked box).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted under `name`, or "" if there is none
    pub fn first(&self, name: &str) -> &str {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    }

    /// Every value submitted under `name`, normalized to a list
    ///
    /// A missing field gives an empty list and a single value a one-element
    /// list, so callers never care how the browser sent it.
    pub fn all(&self, name: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

/// A validation failure attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A rejected submission: the sanitized values to re-display and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid<F> {
    pub form: F,
    pub errors: Vec<FieldError>,
}

/// User-facing message for one `(field, error code)` pair
pub type Message = (&'static str, &'static str, &'static str);

/// Run the derived checks and translate failures through `messages`
///
/// `messages` lists fields in form order and, within a field, codes in
/// priority order. Only the first matching entry per field is reported, so a
/// blank name says "required" and nothing else. Errors from all fields are
/// kept.
pub fn check<T: Validate>(form: &T, messages: &[Message]) -> Vec<FieldError> {
    match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => field_errors(&errors, messages),
    }
}

fn field_errors(errors: &ValidationErrors, messages: &[Message]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut reported: Vec<FieldError> = Vec::new();

    for &(field, code, message) in messages {
        if reported.iter().any(|e| e.field == field) {
            continue;
        }
        let failed = by_field
            .get(field)
            .is_some_and(|list| list.iter().any(|e| e.code == code));
        if failed {
            reported.push(FieldError::new(field, message));
        }
    }

    if reported.is_empty() {
        // A code with no message still rejects the form
        tracing::warn!("Unmapped validation errors: {}", errors);
        reported.push(FieldError::new("form", "The submission is invalid."));
    }
    reported
}
