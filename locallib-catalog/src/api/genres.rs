//! Genre handlers: list, detail, create, update, delete

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use locallib_common::db::Genre;
use tracing::info;

use super::{parse_id, parse_id_or_redirect};
use crate::db::genres::{self, GenreWrite};
use crate::db::books;
use crate::error::CatalogResult;
use crate::queries::{self, GenreDetail};
use crate::validation::forms::GenreForm;
use crate::validation::{FieldError, FormData};
use crate::views;
use crate::AppState;

const GENRE_LIST_URL: &str = "/catalog/genres";

/// GET /catalog/genres
pub async fn genre_list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let genres = queries::genre_list(&state.db).await?;
    Ok(views::genre::genre_list(&genres))
}

/// GET /catalog/genre/:id
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id, "Genre")?;
    let detail = queries::genre_detail(&state.db, id).await?;
    Ok(views::genre::genre_detail(&detail))
}

/// GET /catalog/genre/create
pub async fn genre_create_get() -> Html<String> {
    views::genre::genre_form("Create Genre", &GenreForm::default(), &[])
}

/// POST /catalog/genre/create
///
/// An existing genre with the same name is reused rather than duplicated.
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> CatalogResult<Response> {
    let name = match GenreForm::validate_submission(&FormData::from(pairs)) {
        Ok(name) => name,
        Err(invalid) => {
            return Ok(
                views::genre::genre_form("Create Genre", &invalid.form, &invalid.errors).into_response(),
            )
        }
    };

    if let Some(existing) = genres::find_genre_by_name(&state.db, &name).await? {
        info!("Genre '{}' already exists ({}), redirecting", existing.name, existing.id);
        return Ok(Redirect::to(&existing.url()).into_response());
    }

    let genre = match genres::insert_genre(&state.db, &name).await? {
        GenreWrite::Saved(genre) => {
            info!("Created genre '{}' ({})", genre.name, genre.id);
            genre
        }
        GenreWrite::NameTaken(genre) => {
            info!("Genre '{}' was created concurrently ({}), redirecting", genre.name, genre.id);
            genre
        }
    };

    Ok(Redirect::to(&genre.url()).into_response())
}

/// GET /catalog/genre/:id/update
pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id, "Genre")?;
    let genre = queries::require_genre(&state.db, id).await?;
    Ok(views::genre::genre_form("Update Genre", &GenreForm::from(&genre), &[]))
}

/// POST /catalog/genre/:id/update
///
/// Rebuilds the genre under its original id and upserts it.
pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> CatalogResult<Response> {
    let id = parse_id(&id, "Genre")?;

    let name = match GenreForm::validate_submission(&FormData::from(pairs)) {
        Ok(name) => name,
        Err(invalid) => {
            return Ok(
                views::genre::genre_form("Update Genre", &invalid.form, &invalid.errors).into_response(),
            )
        }
    };

    let genre = Genre { id, name };
    match genres::upsert_genre(&state.db, &genre).await? {
        GenreWrite::Saved(saved) => {
            info!("Updated genre '{}' ({})", saved.name, saved.id);
            Ok(Redirect::to(&saved.url()).into_response())
        }
        GenreWrite::NameTaken(other) => {
            info!("Genre name '{}' already used by {}", other.name, other.id);
            let errors = [FieldError::new("name", "A genre with that name already exists")];
            Ok(views::genre::genre_form("Update Genre", &GenreForm::from(&genre), &errors).into_response())
        }
    }
}

/// Genre plus the books that block its deletion; `None` if the genre is gone
async fn load_for_delete(state: &AppState, id: uuid::Uuid) -> CatalogResult<Option<GenreDetail>> {
    let (genre, books) = tokio::try_join!(
        genres::load_genre(&state.db, id),
        books::list_books_by_genre(&state.db, id),
    )?;
    Ok(genre.map(|genre| GenreDetail { genre, books }))
}

/// GET /catalog/genre/:id/delete
pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Response> {
    let Some(id) = parse_id_or_redirect(&id) else {
        return Ok(Redirect::to(GENRE_LIST_URL).into_response());
    };

    match load_for_delete(&state, id).await? {
        Some(detail) => Ok(views::genre::genre_delete(&detail).into_response()),
        None => Ok(Redirect::to(GENRE_LIST_URL).into_response()),
    }
}

/// POST /catalog/genre/:id/delete
///
/// Refused while any book is filed under the genre; the confirmation page is
/// shown again with the blocking books.
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Response> {
    let Some(id) = parse_id_or_redirect(&id) else {
        return Ok(Redirect::to(GENRE_LIST_URL).into_response());
    };

    let Some(detail) = load_for_delete(&state, id).await? else {
        return Ok(Redirect::to(GENRE_LIST_URL).into_response());
    };

    if !detail.books.is_empty() {
        info!(
            "Refusing to delete genre '{}' ({}): {} book(s) still filed under it",
            detail.genre.name,
            id,
            detail.books.len()
        );
        return Ok(views::genre::genre_delete(&detail).into_response());
    }

    if genres::delete_genre(&state.db, id).await? {
        info!("Deleted genre '{}' ({})", detail.genre.name, id);
    }
    Ok(Redirect::to(GENRE_LIST_URL).into_response())
}
