//! Home page and top-level redirects

use axum::{
    extract::State,
    response::{Html, Redirect},
};

use crate::error::{CatalogError, CatalogResult};
use crate::queries;
use crate::views;
use crate::AppState;

/// GET /catalog
///
/// Always renders; counts that could not be read are reported on the page.
pub async fn home(State(state): State<AppState>) -> Html<String> {
    let counts = queries::home_counts(&state.db).await;
    views::home::home_page(&counts)
}

/// GET /
pub async fn root_redirect() -> Redirect {
    Redirect::to("/catalog/")
}

/// GET /users
pub async fn users_placeholder() -> &'static str {
    "respond with a resource"
}

/// Fallback for unknown routes
pub async fn page_not_found() -> CatalogResult<()> {
    Err(CatalogError::not_found("Page"))
}
