//! Book copy handlers: list, detail

use axum::{
    extract::{Path, State},
    response::Html,
};

use super::parse_id;
use crate::error::CatalogResult;
use crate::queries;
use crate::views;
use crate::AppState;

/// GET /catalog/bookinstances
pub async fn copy_list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let copies = queries::copy_list(&state.db).await?;
    Ok(views::copy::copy_list(&copies))
}

/// GET /catalog/bookinstance/:id
pub async fn copy_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id, "Book copy")?;
    let listing = queries::copy_detail(&state.db, id).await?;
    Ok(views::copy::copy_detail(&listing))
}
