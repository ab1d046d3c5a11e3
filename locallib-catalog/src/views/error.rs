//! Error page

use axum::{http::StatusCode, response::Html};

use super::page;
use crate::validation::escape;

/// Render an error page; `detail` is only passed in development
pub fn error_page(status: StatusCode, message: &str, detail: Option<&str>) -> Html<String> {
    let detail = detail
        .map(|d| format!("    <pre class=\"error-detail\">{}</pre>\n", escape(d)))
        .unwrap_or_default();

    let message = escape(message);
    page(
        &message,
        &format!(
            "    <h1>{message}</h1>\n    <h2>{status}</h2>\n{detail}",
            message = message,
            status = status.as_u16(),
            detail = detail,
        ),
    )
}
