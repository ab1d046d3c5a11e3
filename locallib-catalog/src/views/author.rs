//! Author pages

use axum::response::Html;
use locallib_common::db::Author;

use super::{error_list, page};
use crate::queries::AuthorDetail;
use crate::validation::forms::AuthorForm;
use crate::validation::{escape, FieldError};

fn lifespan_suffix(author: &Author) -> String {
    let lifespan = author.lifespan();
    if lifespan.is_empty() {
        String::new()
    } else {
        format!(" ({})", lifespan)
    }
}

pub fn author_list(authors: &[Author]) -> Html<String> {
    let body = if authors.is_empty() {
        "    <p>There are no authors.</p>\n".to_string()
    } else {
        let items: String = authors
            .iter()
            .map(|a| {
                format!(
                    "        <li><a href=\"{}\">{}</a>{}</li>\n",
                    a.url(),
                    a.name(),
                    lifespan_suffix(a)
                )
            })
            .collect();
        format!("    <ul>\n{}    </ul>\n", items)
    };

    page("Author List", &format!("    <h1>Author List</h1>\n{}", body))
}

pub fn author_detail(detail: &AuthorDetail) -> Html<String> {
    let author = &detail.author;
    let books = if detail.books.is_empty() {
        "    <p>This author has no books.</p>\n".to_string()
    } else {
        let items: String = detail
            .books
            .iter()
            .map(|b| {
                format!(
                    "        <dt><a href=\"{}\">{}</a></dt>\n        <dd>{}</dd>\n",
                    b.url(),
                    b.title,
                    b.summary
                )
            })
            .collect();
        format!("    <dl>\n{}    </dl>\n", items)
    };

    page(
        &format!("Author: {}", author.name()),
        &format!(
            r#"    <h1>Author: {name}</h1>
    <p>{lifespan}</p>
    <div class="section">
    <h4>Books</h4>
{books}    </div>
"#,
            name = author.name(),
            lifespan = author.lifespan(),
            books = books,
        ),
    )
}

/// Author create form
///
/// Name fields were escaped on submission; the date fields were only
/// trimmed, so they are escaped here.
pub fn author_form(title: &str, form: &AuthorForm, errors: &[FieldError]) -> Html<String> {
    page(
        title,
        &format!(
            r#"    <h1>{title}</h1>
    <form method="POST" action="">
        <div class="form-group">
            <label for="first_name">First Name:</label>
            <input id="first_name" type="text" placeholder="First name" name="first_name" required value="{first_name}">
            <label for="family_name">Family Name:</label>
            <input id="family_name" type="text" placeholder="Family name" name="family_name" required value="{family_name}">
        </div>
        <div class="form-group">
            <label for="date_of_birth">Date of birth:</label>
            <input id="date_of_birth" type="date" name="date_of_birth" value="{date_of_birth}">
        </div>
        <div class="form-group">
            <label for="date_of_death">Date of death:</label>
            <input id="date_of_death" type="date" name="date_of_death" value="{date_of_death}">
        </div>
        <button type="submit">Submit</button>
    </form>
{errors}"#,
            title = title,
            first_name = form.first_name,
            family_name = form.family_name,
            date_of_birth = escape(&form.date_of_birth),
            date_of_death = escape(&form.date_of_death),
            errors = error_list(errors),
        ),
    )
}
