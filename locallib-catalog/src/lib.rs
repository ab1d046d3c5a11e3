//! locallib-catalog library - lending library catalog service
//!
//! Server-rendered list, detail and form pages for authors, books, genres
//! and book copies, backed by SQLite.

use axum::{
    http::{header, HeaderValue},
    middleware, Router,
};
use locallib_common::config::Environment;
use sqlx::SqlitePool;
use tower_http::{
    compression::CompressionLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

pub mod api;
pub mod db;
pub mod error;
pub mod queries;
pub mod validation;
pub mod views;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Controls whether error pages include error detail
    pub environment: Environment,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, environment: Environment) -> Self {
        Self { db, environment }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::catalog_routes())
        .merge(api::site_routes())
        .merge(api::health_routes())
        .fallback(api::page_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error::render_error_pages,
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
