//! Author handlers: list, detail, create

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::info;

use super::parse_id;
use crate::db::authors;
use crate::error::CatalogResult;
use crate::queries;
use crate::validation::forms::AuthorForm;
use crate::validation::FormData;
use crate::views;
use crate::AppState;

/// GET /catalog/authors
pub async fn author_list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let authors = queries::author_list(&state.db).await?;
    Ok(views::author::author_list(&authors))
}

/// GET /catalog/author/:id
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id, "Author")?;
    let detail = queries::author_detail(&state.db, id).await?;
    Ok(views::author::author_detail(&detail))
}

/// GET /catalog/author/create
pub async fn author_create_get() -> Html<String> {
    views::author::author_form("Create Author", &AuthorForm::default(), &[])
}

/// POST /catalog/author/create
///
/// Same names and dates as an existing author redirect to that author.
pub async fn author_create_post(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> CatalogResult<Response> {
    let draft = match AuthorForm::validate_submission(&FormData::from(pairs)) {
        Ok(draft) => draft,
        Err(invalid) => {
            return Ok(
                views::author::author_form("Create Author", &invalid.form, &invalid.errors)
                    .into_response(),
            )
        }
    };

    if let Some(existing) = authors::find_author(&state.db, &draft).await? {
        info!("Author '{}' already exists ({}), redirecting", existing.name(), existing.id);
        return Ok(Redirect::to(&existing.url()).into_response());
    }

    let author = authors::insert_author(&state.db, draft).await?;
    info!("Created author '{}' ({})", author.name(), author.id);
    Ok(Redirect::to(&author.url()).into_response())
}
