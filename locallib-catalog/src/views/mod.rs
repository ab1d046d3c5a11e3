//! HTML rendering
//!
//! Pages are plain `format!` templates wrapped in a shared layout. Record
//! text is already escaped when it is stored, so record fields are written
//! as-is; anything else that reaches a page (error messages, debug detail,
//! unsanitized form echoes) goes through [`escape`].

use axum::response::Html;

use crate::validation::{escape, FieldError};

pub mod author;
pub mod book;
pub mod copy;
pub mod error;
pub mod genre;
pub mod home;

const SIDEBAR: &str = r#"<ul class="sidebar-nav">
        <li><a href="/catalog">Home</a></li>
        <li><a href="/catalog/books">All books</a></li>
        <li><a href="/catalog/authors">All authors</a></li>
        <li><a href="/catalog/genres">All genres</a></li>
        <li><a href="/catalog/bookinstances">All book-instances</a></li>
        <li><hr></li>
        <li><a href="/catalog/author/create">Create new author</a></li>
        <li><a href="/catalog/genre/create">Create new genre</a></li>
        <li><a href="/catalog/book/create">Create new book</a></li>
        <li><a href="/catalog/bookinstance/create">Create new book instance (copy)</a></li>
    </ul>"#;

/// Wrap page content in the shared layout
pub fn page(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/stylesheets/style.css">
</head>
<body>
<div class="container">
    <nav class="sidebar">
    {sidebar}
    </nav>
    <main class="content">
{content}
    </main>
</div>
</body>
</html>
"#,
        title = title,
        sidebar = SIDEBAR,
        content = content,
    ))
}

/// Validation errors as a list, or nothing when there are none
pub(crate) fn error_list(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("        <li>{}</li>\n", escape(&e.message)))
        .collect();
    format!("    <ul class=\"errors\">\n{}    </ul>\n", items)
}

/// `checked`/`selected` attribute helper
pub(crate) fn flag(on: bool, attribute: &str) -> &str {
    if on {
        attribute
    } else {
        ""
    }
}
