//! Catalog home page

use axum::response::Html;

use super::page;
use crate::queries::HomeCounts;
use crate::validation::escape;

fn count_text(count: Option<i64>) -> String {
    count.map(|n| n.to_string()).unwrap_or_else(|| "unavailable".to_string())
}

pub fn home_page(counts: &HomeCounts) -> Html<String> {
    let error = counts
        .error
        .as_deref()
        .map(|e| format!("    <p class=\"error\">Error: {}</p>\n", escape(e)))
        .unwrap_or_default();

    page(
        "Local Library Home",
        &format!(
            r#"    <h1>Local Library Home</h1>
    <p>Welcome to <em>LocalLibrary</em>, a very basic catalog of the books held by a small lending library.</p>
    <h2>Dynamic content</h2>
{error}    <p>The library has the following record counts:</p>
    <ul>
        <li><strong>Books:</strong> {books}</li>
        <li><strong>Copies:</strong> {copies}</li>
        <li><strong>Copies available:</strong> {available}</li>
        <li><strong>Authors:</strong> {authors}</li>
        <li><strong>Genres:</strong> {genres}</li>
    </ul>
"#,
            error = error,
            books = count_text(counts.books),
            copies = count_text(counts.copies),
            available = count_text(counts.copies_available),
            authors = count_text(counts.authors),
            genres = count_text(counts.genres),
        ),
    )
}
