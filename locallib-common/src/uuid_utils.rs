//! Record identifier utilities
//!
//! Identifiers are UUIDv4 values persisted as hyphenated text.

use uuid::Uuid;

use crate::{Error, Result};

/// Generate a new record identifier
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse an identifier taken from a URL path or form field
pub fn parse(s: &str) -> std::result::Result<Uuid, uuid::Error> {
    Uuid::parse_str(s.trim())
}

/// Parse an identifier read back from the store
///
/// A malformed stored id is a data corruption problem, not a user error.
pub fn parse_stored(column: &str, s: &str) -> Result<Uuid> {
    Uuid::parse_str(s)
        .map_err(|_| Error::corrupt(column, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_v4() {
        let id = generate();
        assert_eq!(id.get_version_num(), 4);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = generate();
        let parsed = parse(&format!("  {}\n", id)).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("not-an-id").is_err());
    }

    #[test]
    fn test_parse_stored_reports_column() {
        let err = parse_stored("books.author_id", "xyz").unwrap_err();
        assert!(err.to_string().contains("books.author_id"));
    }
}
