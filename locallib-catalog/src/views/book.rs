//! Book pages

use axum::response::Html;
use locallib_common::db::{Author, CopyStatus, Genre};

use super::copy::status_label;
use super::{error_list, flag, page};
use crate::queries::{BookDetail, BookListing};
use crate::validation::forms::BookForm;
use crate::validation::FieldError;

pub fn book_list(books: &[BookListing]) -> Html<String> {
    let body = if books.is_empty() {
        "    <p>There are no books.</p>\n".to_string()
    } else {
        let items: String = books
            .iter()
            .map(|listing| {
                format!(
                    "        <li><a href=\"{}\">{}</a> ({})</li>\n",
                    listing.book.url(),
                    listing.book.title,
                    listing.author.name()
                )
            })
            .collect();
        format!("    <ul>\n{}    </ul>\n", items)
    };

    page("Book List", &format!("    <h1>Book List</h1>\n{}", body))
}

pub fn book_detail(detail: &BookDetail) -> Html<String> {
    let book = &detail.book;

    let genres = detail
        .genres
        .iter()
        .map(|g| format!("<a href=\"{}\">{}</a>", g.url(), g.name))
        .collect::<Vec<_>>()
        .join(", ");

    let copies = if detail.copies.is_empty() {
        "    <p>There are no copies of this book in the library.</p>\n".to_string()
    } else {
        detail
            .copies
            .iter()
            .map(|listing| {
                let copy = &listing.copy;
                let due = if copy.status == CopyStatus::Available {
                    String::new()
                } else {
                    format!(
                        "        <p><strong>Due back:</strong> {}</p>\n",
                        copy.due_back_formatted()
                    )
                };
                format!(
                    r#"    <hr>
    <div class="copy">
        <p>{status}</p>
        <p><strong>Imprint:</strong> {imprint}</p>
{due}        <p><strong>Id:</strong> <a href="{url}">{id}</a></p>
    </div>
"#,
                    status = status_label(copy),
                    imprint = copy.imprint,
                    due = due,
                    url = copy.url(),
                    id = copy.id,
                )
            })
            .collect()
    };

    page(
        &book.title,
        &format!(
            r#"    <h1>Title: {title}</h1>
    <p><strong>Author:</strong> <a href="{author_url}">{author}</a></p>
    <p><strong>Summary:</strong> {summary}</p>
    <p><strong>ISBN:</strong> {isbn}</p>
    <p><strong>Genre:</strong> {genres}</p>
    <div class="section">
    <h4>Copies</h4>
{copies}    </div>
"#,
            title = book.title,
            author_url = detail.author.url(),
            author = detail.author.name(),
            summary = book.summary,
            isbn = book.isbn,
            genres = genres,
            copies = copies,
        ),
    )
}

/// Book create form
///
/// The author select and genre checkboxes are rebuilt from the current
/// records; previously submitted choices stay selected.
pub fn book_form(
    title: &str,
    form: &BookForm,
    authors: &[Author],
    genres: &[Genre],
    errors: &[FieldError],
) -> Html<String> {
    let author_options: String = authors
        .iter()
        .map(|a| {
            format!(
                "                <option value=\"{}\"{}>{}</option>\n",
                a.id,
                flag(form.has_author(a.id), " selected"),
                a.name()
            )
        })
        .collect();

    let genre_boxes: String = genres
        .iter()
        .map(|g| {
            format!(
                "            <div class=\"checkbox\">\n                <input type=\"checkbox\" name=\"genre\" id=\"{id}\" value=\"{id}\"{checked}>\n                <label for=\"{id}\">{name}</label>\n            </div>\n",
                id = g.id,
                checked = flag(form.has_genre(g.id), " checked"),
                name = g.name,
            )
        })
        .collect();

    page(
        title,
        &format!(
            r#"    <h1>{title}</h1>
    <form method="POST" action="">
        <div class="form-group">
            <label for="title">Title:</label>
            <input id="title" type="text" placeholder="Name of book" name="title" required value="{book_title}">
        </div>
        <div class="form-group">
            <label for="author">Author:</label>
            <select id="author" name="author" required>
                <option value="">--Please select an author--</option>
{author_options}            </select>
        </div>
        <div class="form-group">
            <label for="summary">Summary:</label>
            <textarea id="summary" placeholder="Summary" name="summary" required>{summary}</textarea>
        </div>
        <div class="form-group">
            <label for="isbn">ISBN:</label>
            <input id="isbn" type="text" placeholder="ISBN13" name="isbn" required value="{isbn}">
        </div>
        <div class="form-group">
            <label>Genre:</label>
{genre_boxes}        </div>
        <button type="submit">Submit</button>
    </form>
{errors}"#,
            title = title,
            book_title = form.title,
            author_options = author_options,
            summary = form.summary,
            isbn = form.isbn,
            genre_boxes = genre_boxes,
            errors = error_list(errors),
        ),
    )
}
