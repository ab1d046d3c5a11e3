//! HTTP handlers for locallib-catalog

use axum::{routing::get, Router};
use locallib_common::uuid_utils;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::AppState;

pub mod authors;
pub mod books;
pub mod copies;
pub mod genres;
pub mod health;
pub mod home;
pub mod static_assets;
pub mod stubs;

pub use health::health_routes;
pub use home::page_not_found;

/// Parse a record id from the path; anything unparseable cannot exist
pub(crate) fn parse_id(raw: &str, what: &str) -> CatalogResult<Uuid> {
    uuid_utils::parse(raw).map_err(|_| CatalogError::not_found(what))
}

/// Delete routes send malformed ids back to the list instead of a 404
pub(crate) fn parse_id_or_redirect(raw: &str) -> Option<Uuid> {
    uuid_utils::parse(raw).ok()
}

/// Catalog routes under `/catalog`
pub fn catalog_routes() -> Router<AppState> {
    use stubs::not_implemented;

    Router::new()
        .route("/catalog", get(home::home))
        .route("/catalog/", get(home::home))
        // Authors
        .route("/catalog/authors", get(authors::author_list))
        .route(
            "/catalog/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/catalog/author/:id", get(authors::author_detail))
        .route("/catalog/author/:id/delete", not_implemented("Author", "delete"))
        .route("/catalog/author/:id/update", not_implemented("Author", "update"))
        // Books
        .route("/catalog/books", get(books::book_list))
        .route(
            "/catalog/book/create",
            get(books::book_create_get).post(books::book_create_post),
        )
        .route("/catalog/book/:id", get(books::book_detail))
        .route("/catalog/book/:id/delete", not_implemented("Book", "delete"))
        .route("/catalog/book/:id/update", not_implemented("Book", "update"))
        // Genres
        .route("/catalog/genres", get(genres::genre_list))
        .route(
            "/catalog/genre/create",
            get(genres::genre_create_get).post(genres::genre_create_post),
        )
        .route("/catalog/genre/:id", get(genres::genre_detail))
        .route(
            "/catalog/genre/:id/delete",
            get(genres::genre_delete_get).post(genres::genre_delete_post),
        )
        .route(
            "/catalog/genre/:id/update",
            get(genres::genre_update_get).post(genres::genre_update_post),
        )
        // Book copies
        .route("/catalog/bookinstances", get(copies::copy_list))
        .route(
            "/catalog/bookinstance/create",
            not_implemented("BookInstance", "create"),
        )
        .route("/catalog/bookinstance/:id", get(copies::copy_detail))
        .route(
            "/catalog/bookinstance/:id/delete",
            not_implemented("BookInstance", "delete"),
        )
        .route(
            "/catalog/bookinstance/:id/update",
            not_implemented("BookInstance", "update"),
        )
}

/// Routes outside the catalog: root redirect, user placeholder, stylesheet
pub fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::root_redirect))
        .route("/users", get(home::users_placeholder))
        .route("/stylesheets/style.css", get(static_assets::serve_style_css))
}
