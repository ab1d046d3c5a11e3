//! Per-entity form definitions
//!
//! Each form sanitizes the submission into itself, runs its derived checks
//! and converts the outcome into a typed draft, or an [`Invalid`] with the
//! values to re-display.

use std::collections::BTreeSet;

use locallib_common::db::Genre;
use locallib_common::time::parse_iso_date;
use locallib_common::uuid_utils;
use uuid::Uuid;
use validator::Validate;

use super::rules::{self, sanitize, trimmed, BLANK, LENGTH, NOT_ALPHANUMERIC, NOT_AN_ID, NOT_A_DATE};
use super::{check, FieldError, FormData, Invalid, Message};
use crate::db::authors::AuthorDraft;
use crate::db::books::BookDraft;

/// Genre create/update form
///
/// The name bounds apply to the escaped name, which is what gets stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GenreForm {
    #[validate(
        custom(function = "rules::not_blank"),
        length(min = 3, max = 100)
    )]
    pub name: String,
}

impl GenreForm {
    const MESSAGES: &'static [Message] = &[
        ("name", BLANK, "Genre name required"),
        ("name", LENGTH, "Genre name must be between 3 and 100 characters"),
    ];

    fn sanitized(data: &FormData) -> Self {
        Self {
            name: sanitize(data.first("name")),
        }
    }

    /// Validate a submission, yielding the sanitized genre name
    pub fn validate_submission(data: &FormData) -> Result<String, Invalid<GenreForm>> {
        let form = Self::sanitized(data);
        let errors = check(&form, Self::MESSAGES);
        if errors.is_empty() {
            Ok(form.name)
        } else {
            Err(Invalid { form, errors })
        }
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

/// Author create form
///
/// Names are stored escaped; dates are only trimmed, since they are parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct AuthorForm {
    #[validate(
        custom(function = "rules::not_blank"),
        custom(function = "rules::alphanumeric"),
        length(max = 100)
    )]
    pub first_name: String,
    #[validate(
        custom(function = "rules::not_blank"),
        custom(function = "rules::alphanumeric"),
        length(max = 100)
    )]
    pub family_name: String,
    #[validate(custom(function = "rules::optional_iso_date"))]
    pub date_of_birth: String,
    #[validate(custom(function = "rules::optional_iso_date"))]
    pub date_of_death: String,
}

impl AuthorForm {
    const MESSAGES: &'static [Message] = &[
        ("first_name", BLANK, "First name must be specified."),
        ("first_name", LENGTH, "First name must be at most 100 characters."),
        ("first_name", NOT_ALPHANUMERIC, "First name has non-alphanumeric characters."),
        ("family_name", BLANK, "Family name must be specified."),
        ("family_name", LENGTH, "Family name must be at most 100 characters."),
        ("family_name", NOT_ALPHANUMERIC, "Family name has non-alphanumeric characters."),
        ("date_of_birth", NOT_A_DATE, "Invalid date of birth"),
        ("date_of_death", NOT_A_DATE, "Invalid date of death"),
    ];

    fn sanitized(data: &FormData) -> Self {
        Self {
            first_name: sanitize(data.first("first_name")),
            family_name: sanitize(data.first("family_name")),
            date_of_birth: trimmed(data.first("date_of_birth")),
            date_of_death: trimmed(data.first("date_of_death")),
        }
    }

    pub fn validate_submission(data: &FormData) -> Result<AuthorDraft, Invalid<AuthorForm>> {
        let form = Self::sanitized(data);
        let mut errors = check(&form, Self::MESSAGES);

        let date_of_birth = parse_iso_date(&form.date_of_birth);
        let date_of_death = parse_iso_date(&form.date_of_death);
        if let (Some(born), Some(died)) = (date_of_birth, date_of_death) {
            if died < born {
                errors.push(FieldError::new(
                    "date_of_death",
                    "Date of death must not be before date of birth",
                ));
            }
        }

        if !errors.is_empty() {
            return Err(Invalid { form, errors });
        }

        Ok(AuthorDraft {
            first_name: form.first_name,
            family_name: form.family_name,
            date_of_birth,
            date_of_death,
        })
    }
}

/// Book create form
///
/// `author` and `genre` carry record ids as submitted by the select box and
/// the genre checkboxes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct BookForm {
    #[validate(custom(function = "rules::not_blank"))]
    pub title: String,
    #[validate(
        custom(function = "rules::not_blank"),
        custom(function = "rules::optional_record_id")
    )]
    pub author: String,
    #[validate(custom(function = "rules::not_blank"))]
    pub summary: String,
    #[validate(custom(function = "rules::not_blank"))]
    pub isbn: String,
    #[validate(custom(function = "rules::record_ids"))]
    pub genre: Vec<String>,
}

impl BookForm {
    const MESSAGES: &'static [Message] = &[
        ("title", BLANK, "Title must not be empty."),
        ("author", BLANK, "Author must not be empty."),
        ("author", NOT_AN_ID, "Author must be a valid selection."),
        ("summary", BLANK, "Summary must not be empty."),
        ("isbn", BLANK, "ISBN must not be empty"),
        ("genre", NOT_AN_ID, "Unknown genre selected."),
    ];

    fn sanitized(data: &FormData) -> Self {
        Self {
            title: sanitize(data.first("title")),
            author: sanitize(data.first("author")),
            summary: sanitize(data.first("summary")),
            isbn: sanitize(data.first("isbn")),
            genre: data.all("genre").iter().map(|g| sanitize(g)).collect(),
        }
    }

    pub fn validate_submission(data: &FormData) -> Result<BookDraft, Invalid<BookForm>> {
        let form = Self::sanitized(data);
        let errors = check(&form, Self::MESSAGES);

        let author_id = uuid_utils::parse(&form.author).ok();
        let genre_ids: Result<BTreeSet<Uuid>, _> = form
            .genre
            .iter()
            .filter(|g| !g.is_empty())
            .map(|g| uuid_utils::parse(g))
            .collect();

        match (author_id, genre_ids) {
            (Some(author_id), Ok(genre_ids)) if errors.is_empty() => Ok(BookDraft {
                title: form.title,
                author_id,
                summary: form.summary,
                isbn: form.isbn,
                genre_ids,
            }),
            _ => Err(Invalid { form, errors }),
        }
    }

    /// True if `id` is the submitted author, whatever case it was sent in
    pub fn has_author(&self, id: Uuid) -> bool {
        uuid_utils::parse(&self.author).is_ok_and(|author| author == id)
    }

    /// True if `id` was among the submitted genre selections
    pub fn has_genre(&self, id: Uuid) -> bool {
        self.genre
            .iter()
            .any(|g| uuid_utils::parse(g).is_ok_and(|genre| genre == id))
    }
}

impl From<&BookDraft> for BookForm {
    fn from(draft: &BookDraft) -> Self {
        Self {
            title: draft.title.clone(),
            author: draft.author_id.to_string(),
            summary: draft.summary.clone(),
            isbn: draft.isbn.clone(),
            genre: draft.genre_ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_genre_name_trimmed_and_escaped() {
        let name = GenreForm::validate_submission(&form(&[("name", "  Sci & Fi ")])).unwrap();
        assert_eq!(name, "Sci &amp; Fi");
    }

    #[test]
    fn test_genre_name_too_short() {
        let invalid = GenreForm::validate_submission(&form(&[("name", " ab ")])).unwrap_err();
        assert_eq!(invalid.form.name, "ab");
        assert_eq!(invalid.errors.len(), 1);
        assert_eq!(invalid.errors[0].field, "name");
    }

    #[test]
    fn test_genre_name_bounds_apply_to_stored_value() {
        let name = "a".repeat(99) + "&";
        let invalid = GenreForm::validate_submission(&form(&[("name", &name)])).unwrap_err();
        assert_eq!(invalid.form.name.chars().count(), 104);
        assert_eq!(
            invalid.errors[0].message,
            "Genre name must be between 3 and 100 characters"
        );

        let slashes = "/".repeat(100);
        assert!(GenreForm::validate_submission(&form(&[("name", &slashes)])).is_err());

        let stored = GenreForm::validate_submission(&form(&[("name", &"a".repeat(100))])).unwrap();
        assert_eq!(stored.chars().count(), Genre::NAME_MAX);
    }

    #[test]
    fn test_genre_name_missing() {
        let invalid = GenreForm::validate_submission(&FormData::default()).unwrap_err();
        assert_eq!(invalid.errors[0].message, "Genre name required");
    }

    #[test]
    fn test_author_valid_with_dates() {
        let draft = AuthorForm::validate_submission(&form(&[
            ("first_name", "Isaac"),
            ("family_name", "Asimov"),
            ("date_of_birth", "1920-01-02"),
            ("date_of_death", "1992-04-06"),
        ]))
        .unwrap();

        assert_eq!(draft.family_name, "Asimov");
        assert_eq!(draft.date_of_birth, NaiveDate::from_ymd_opt(1920, 1, 2));
        assert_eq!(draft.date_of_death, NaiveDate::from_ymd_opt(1992, 4, 6));
    }

    #[test]
    fn test_author_errors_accumulate() {
        let invalid = AuthorForm::validate_submission(&form(&[
            ("first_name", ""),
            ("family_name", "Le Guin"),
            ("date_of_birth", "not a date"),
        ]))
        .unwrap_err();

        let fields: Vec<&str> = invalid.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["first_name", "family_name", "date_of_birth"]);
        assert_eq!(invalid.form.family_name, "Le Guin");
        assert_eq!(invalid.form.date_of_birth, "not a date");
    }

    #[test]
    fn test_author_death_before_birth() {
        let invalid = AuthorForm::validate_submission(&form(&[
            ("first_name", "Ann"),
            ("family_name", "Leckie"),
            ("date_of_birth", "1966-03-02"),
            ("date_of_death", "1960-01-01"),
        ]))
        .unwrap_err();

        assert_eq!(invalid.errors.len(), 1);
        assert_eq!(invalid.errors[0].field, "date_of_death");
    }

    #[test]
    fn test_author_blank_name_reports_only_required() {
        let invalid = AuthorForm::validate_submission(&form(&[("first_name", "  "), ("family_name", "Leckie")]))
            .unwrap_err();
        assert_eq!(invalid.errors, vec![FieldError::new("first_name", "First name must be specified.")]);
    }

    #[test]
    fn test_book_single_genre_becomes_set() {
        let author = Uuid::new_v4();
        let genre = Uuid::new_v4();
        let draft = BookForm::validate_submission(&form(&[
            ("title", "Dune"),
            ("author", &author.to_string()),
            ("summary", "Spice"),
            ("isbn", "9780441013593"),
            ("genre", &genre.to_string()),
        ]))
        .unwrap();

        assert_eq!(draft.author_id, author);
        assert_eq!(draft.genre_ids.len(), 1);
        assert!(draft.genre_ids.contains(&genre));
    }

    #[test]
    fn test_book_without_genre_has_empty_set() {
        let draft = BookForm::validate_submission(&form(&[
            ("title", "Dune"),
            ("author", &Uuid::new_v4().to_string()),
            ("summary", "Spice"),
            ("isbn", "9780441013593"),
        ]))
        .unwrap();

        assert!(draft.genre_ids.is_empty());
    }

    #[test]
    fn test_book_duplicate_genres_collapse() {
        let genre = Uuid::new_v4().to_string();
        let draft = BookForm::validate_submission(&form(&[
            ("title", "Dune"),
            ("author", &Uuid::new_v4().to_string()),
            ("summary", "Spice"),
            ("isbn", "9780441013593"),
            ("genre", &genre),
            ("genre", &genre),
        ]))
        .unwrap();

        assert_eq!(draft.genre_ids.len(), 1);
    }

    #[test]
    fn test_book_invalid_keeps_selected_genres() {
        let genre = Uuid::new_v4().to_string();
        let invalid = BookForm::validate_submission(&form(&[
            ("title", ""),
            ("author", "bogus"),
            ("summary", "Spice"),
            ("isbn", ""),
            ("genre", &genre),
        ]))
        .unwrap_err();

        let fields: Vec<&str> = invalid.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "author", "isbn"]);
        assert!(invalid.form.has_genre(Uuid::parse_str(&genre).unwrap()));
        assert_eq!(invalid.form.summary, "Spice");
    }

    #[test]
    fn test_book_malformed_genre_rejected() {
        let invalid = BookForm::validate_submission(&form(&[
            ("title", "Dune"),
            ("author", &Uuid::new_v4().to_string()),
            ("summary", "Spice"),
            ("isbn", "9780441013593"),
            ("genre", "not-an-id"),
        ]))
        .unwrap_err();

        assert_eq!(invalid.errors, vec![FieldError::new("genre", "Unknown genre selected.")]);
    }

    #[test]
    fn test_book_selections_match_ids_in_any_case() {
        let author = Uuid::new_v4();
        let genre = Uuid::new_v4();
        let other = Uuid::new_v4();
        let invalid = BookForm::validate_submission(&form(&[
            ("title", ""),
            ("author", &author.to_string().to_uppercase()),
            ("summary", "Spice"),
            ("isbn", "9780441013593"),
            ("genre", &genre.to_string().to_uppercase()),
        ]))
        .unwrap_err();

        assert!(invalid.form.has_author(author));
        assert!(invalid.form.has_genre(genre));
        assert!(!invalid.form.has_genre(other));
        assert!(!invalid.form.has_author(other));
    }
}
