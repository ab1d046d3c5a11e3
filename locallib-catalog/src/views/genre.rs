//! Genre pages

use axum::response::Html;
use locallib_common::db::{Book, Genre};

use super::{error_list, page};
use crate::queries::GenreDetail;
use crate::validation::forms::GenreForm;
use crate::validation::FieldError;

fn book_summaries(books: &[Book]) -> String {
    books
        .iter()
        .map(|book| {
            format!(
                "        <dt><a href=\"{}\">{}</a></dt>\n        <dd>{}</dd>\n",
                book.url(),
                book.title,
                book.summary
            )
        })
        .collect()
}

pub fn genre_list(genres: &[Genre]) -> Html<String> {
    let body = if genres.is_empty() {
        "    <p>There are no genres.</p>\n".to_string()
    } else {
        let items: String = genres
            .iter()
            .map(|g| format!("        <li><a href=\"{}\">{}</a></li>\n", g.url(), g.name))
            .collect();
        format!("    <ul>\n{}    </ul>\n", items)
    };

    page("Genre List", &format!("    <h1>Genre List</h1>\n{}", body))
}

pub fn genre_detail(detail: &GenreDetail) -> Html<String> {
    let genre = &detail.genre;
    let books = if detail.books.is_empty() {
        "    <p>This genre has no books.</p>\n".to_string()
    } else {
        format!("    <dl>\n{}    </dl>\n", book_summaries(&detail.books))
    };

    page(
        &format!("Genre: {}", genre.name),
        &format!(
            r#"    <h1>Genre: {name}</h1>
    <div class="section">
    <h4>Books</h4>
{books}    </div>
    <hr>
    <p><a href="{url}/delete">Delete genre</a></p>
    <p><a href="{url}/update">Update genre</a></p>
"#,
            name = genre.name,
            books = books,
            url = genre.url(),
        ),
    )
}

/// Create and update form; `title` is "Create Genre" or "Update Genre"
pub fn genre_form(title: &str, form: &GenreForm, errors: &[FieldError]) -> Html<String> {
    page(
        title,
        &format!(
            r#"    <h1>{title}</h1>
    <form method="POST" action="">
        <div class="form-group">
            <label for="name">Genre:</label>
            <input id="name" type="text" placeholder="Fantasy, Poetry etc." name="name" required value="{name}">
        </div>
        <button type="submit">Submit</button>
    </form>
{errors}"#,
            title = title,
            name = form.name,
            errors = error_list(errors),
        ),
    )
}

/// Delete confirmation; lists dependent books instead of the form when any exist
pub fn genre_delete(detail: &GenreDetail) -> Html<String> {
    let genre = &detail.genre;
    let body = if detail.books.is_empty() {
        format!(
            r#"    <p>Do you really want to delete this Genre?</p>
    <form method="POST" action="">
        <input id="genreid" type="hidden" name="genreid" value="{id}">
        <button type="submit">Delete</button>
    </form>
"#,
            id = genre.id,
        )
    } else {
        format!(
            "    <p><strong>Delete the following books before attempting to delete this genre.</strong></p>\n    <h4>Books</h4>\n    <dl>\n{}    </dl>\n",
            book_summaries(&detail.books)
        )
    };

    page(
        "Delete Genre",
        &format!("    <h1>Delete Genre: {}</h1>\n{}", genre.name, body),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn detail(books: Vec<Book>) -> GenreDetail {
        GenreDetail {
            genre: Genre {
                id: Uuid::new_v4(),
                name: "Mystery".to_string(),
            },
            books,
        }
    }

    fn book(title: &str) -> Book {
        Book {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author_id: Uuid::new_v4(),
            summary: "A summary".to_string(),
            isbn: "9780000000000".to_string(),
            genre_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn test_delete_view_offers_form_only_without_dependents() {
        let Html(body) = genre_delete(&detail(vec![]));
        assert!(body.contains("Do you really want to delete this Genre?"));

        let Html(body) = genre_delete(&detail(vec![book("The Hound")]));
        assert!(body.contains("Delete the following books"));
        assert!(body.contains("The Hound"));
        assert!(!body.contains("<form"));
    }

    #[test]
    fn test_form_echoes_value_and_errors() {
        let form = GenreForm {
            name: "ab".to_string(),
        };
        let errors = vec![FieldError::new("name", "Genre name must be between 3 and 100 characters")];
        let Html(body) = genre_form("Create Genre", &form, &errors);
        assert!(body.contains("value=\"ab\""));
        assert!(body.contains("Genre name must be between 3 and 100 characters"));
    }
}
