//! Routes that exist but are not implemented yet
//!
//! Each answers 200 with `NOT IMPLEMENTED: <Entity> <verb> <METHOD>`.

use axum::routing::{get, MethodRouter};
use tracing::debug;

use crate::AppState;

fn placeholder(entity: &str, verb: &str, method: &str) -> String {
    debug!("Unimplemented route hit: {} {} {}", entity, verb, method);
    format!("NOT IMPLEMENTED: {} {} {}", entity, verb, method)
}

/// GET and POST placeholder for one entity action
pub fn not_implemented(entity: &'static str, verb: &'static str) -> MethodRouter<AppState> {
    get(move || async move { placeholder(entity, verb, "GET") })
        .post(move || async move { placeholder(entity, verb, "POST") })
}
