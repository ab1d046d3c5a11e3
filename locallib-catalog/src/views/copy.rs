//! Book copy pages

use axum::response::Html;
use locallib_common::db::{BookCopy, CopyStatus};

use super::page;
use crate::queries::CopyListing;

/// Status label coloured by availability
pub(crate) fn status_label(copy: &BookCopy) -> String {
    let class = match copy.status {
        CopyStatus::Available => "text-success",
        CopyStatus::Maintenance => "text-danger",
        CopyStatus::Loaned | CopyStatus::Reserved => "text-warning",
    };
    format!("<span class=\"{}\">{}</span>", class, copy.status)
}

fn due_suffix(copy: &BookCopy) -> String {
    if copy.status == CopyStatus::Available {
        String::new()
    } else {
        format!(" <span>(Due: {})</span>", copy.due_back_formatted())
    }
}

pub fn copy_list(copies: &[CopyListing]) -> Html<String> {
    let body = if copies.is_empty() {
        "    <p>There are no book copies in this library.</p>\n".to_string()
    } else {
        let items: String = copies
            .iter()
            .map(|listing| {
                format!(
                    "        <li><a href=\"{}\">{} : {}</a> - {}{}</li>\n",
                    listing.copy.url(),
                    listing.book.title,
                    listing.copy.imprint,
                    status_label(&listing.copy),
                    due_suffix(&listing.copy)
                )
            })
            .collect();
        format!("    <ul>\n{}    </ul>\n", items)
    };

    page("Book Instance List", &format!("    <h1>Book Instance List</h1>\n{}", body))
}

pub fn copy_detail(listing: &CopyListing) -> Html<String> {
    let copy = &listing.copy;
    let due = if copy.status == CopyStatus::Available {
        String::new()
    } else {
        format!("    <p><strong>Due back:</strong> {}</p>\n", copy.due_back_formatted())
    };

    page(
        &format!("Copy: {}", listing.book.title),
        &format!(
            r#"    <h1>ID: {id}</h1>
    <p><strong>Title:</strong> <a href="{book_url}">{title}</a></p>
    <p><strong>Imprint:</strong> {imprint}</p>
    <p><strong>Status:</strong> {status}</p>
{due}"#,
            id = copy.id,
            book_url = listing.book.url(),
            title = listing.book.title,
            imprint = copy.imprint,
            status = status_label(copy),
            due = due,
        ),
    )
}
