//! Health check endpoint
//!
//! Reports whether the catalog store answers a trivial query, so a monitor
//! can tell a live process from a usable one.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the store is unreachable
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub environment: String,
    /// "ok" or "unreachable"
    pub database: &'static str,
}

async fn store_reachable(pool: &SqlitePool) -> bool {
    match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool).await {
        Ok(_) => true,
        Err(e) => {
            warn!("Health check could not reach the store: {}", e);
            false
        }
    }
}

/// GET /health
///
/// 200 while the store answers, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = store_reachable(&state.db).await;
    let (code, status, database) = if reachable {
        (StatusCode::OK, "ok", "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
    };

    let body = HealthResponse {
        status,
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment.to_string(),
        database,
    };
    (code, Json(body))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
