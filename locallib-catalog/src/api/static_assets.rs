//! Embedded stylesheet

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const STYLE_CSS: &str = include_str!("../../ui/style.css");

/// GET /stylesheets/style.css
pub async fn serve_style_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "public, max-age=3600"),
        ],
        STYLE_CSS,
    )
        .into_response()
}
