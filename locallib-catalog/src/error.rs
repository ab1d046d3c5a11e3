//! Error types for locallib-catalog
//!
//! Handlers return [`CatalogError`]. Its `IntoResponse` sets the status code
//! and attaches an [`ErrorPage`] marker; [`render_error_pages`] then turns the
//! marker into the HTML error page, adding error detail only in development.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use crate::{views, AppState};

/// Catalog handler error
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Requested record does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Store or shared-library failure (500)
    #[error(transparent)]
    Common(#[from] locallib_common::Error),
}

impl CatalogError {
    pub fn not_found(what: &str) -> Self {
        CatalogError::NotFound(format!("{} not found", what))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Marker placed on error responses for the error page layer
#[derive(Debug, Clone)]
pub struct ErrorPage {
    /// Message shown to every visitor
    pub message: String,
    /// Debug rendering of the error, shown only in development
    pub detail: String,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected ({}): {}", status, self);
        }

        let message = match &self {
            CatalogError::NotFound(msg) => msg.clone(),
            CatalogError::Common(_) => status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string(),
        };

        let mut response = status.into_response();
        response.extensions_mut().insert(ErrorPage {
            message,
            detail: format!("{:?}", self),
        });
        response
    }
}

/// Result type for catalog handlers
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Render the HTML error page for responses carrying an [`ErrorPage`]
pub async fn render_error_pages(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let status = response.status();
    let detail = state
        .environment
        .is_development()
        .then_some(page.detail.as_str());

    (status, views::error::error_page(status, &page.message, detail)).into_response()
}
