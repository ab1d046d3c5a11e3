//! Book handlers: list, detail, create

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::info;

use super::parse_id;
use crate::db::books::{self, BookDraft};
use crate::db::{authors, genres};
use crate::error::CatalogResult;
use crate::queries;
use crate::validation::forms::BookForm;
use crate::validation::{FieldError, FormData};
use crate::views;
use crate::AppState;

/// GET /catalog/books
pub async fn book_list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let books = queries::book_list(&state.db).await?;
    Ok(views::book::book_list(&books))
}

/// GET /catalog/book/:id
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id, "Book")?;
    let detail = queries::book_detail(&state.db, id).await?;
    Ok(views::book::book_detail(&detail))
}

async fn render_form(state: &AppState, form: &BookForm, errors: &[FieldError]) -> CatalogResult<Response> {
    let (authors, genres) = queries::book_form_choices(&state.db).await?;
    Ok(views::book::book_form("Create Book", form, &authors, &genres, errors).into_response())
}

/// GET /catalog/book/create
pub async fn book_create_get(State(state): State<AppState>) -> CatalogResult<Response> {
    render_form(&state, &BookForm::default(), &[]).await
}

/// Check that the draft's author and genres are stored records
async fn reference_errors(state: &AppState, draft: &BookDraft) -> CatalogResult<Vec<FieldError>> {
    let genre_ids: Vec<_> = draft.genre_ids.iter().copied().collect();
    let (author, found_genres) = tokio::try_join!(
        authors::load_author(&state.db, draft.author_id),
        genres::load_genres_by_ids(&state.db, &genre_ids),
    )?;

    let mut errors = Vec::new();
    if author.is_none() {
        errors.push(FieldError::new("author", "Author must be a valid selection."));
    }
    if found_genres.len() != genre_ids.len() {
        errors.push(FieldError::new("genre", "Unknown genre selected."));
    }
    Ok(errors)
}

/// POST /catalog/book/create
///
/// A book matching title, author and ISBN of an existing one redirects to it.
pub async fn book_create_post(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> CatalogResult<Response> {
    let draft = match BookForm::validate_submission(&FormData::from(pairs)) {
        Ok(draft) => draft,
        Err(invalid) => return render_form(&state, &invalid.form, &invalid.errors).await,
    };

    let errors = reference_errors(&state, &draft).await?;
    if !errors.is_empty() {
        return render_form(&state, &BookForm::from(&draft), &errors).await;
    }

    if let Some(existing) = books::find_book(&state.db, &draft).await? {
        info!("Book '{}' already exists ({}), redirecting", existing.title, existing.id);
        return Ok(Redirect::to(&existing.url()).into_response());
    }

    let book = books::insert_book(&state.db, draft).await?;
    info!(
        "Created book '{}' ({}) with {} genre(s)",
        book.title,
        book.id,
        book.genre_ids.len()
    );
    Ok(Redirect::to(&book.url()).into_response())
}
