//! Test Helper Utilities
//!
//! Shared setup for the catalog integration tests: an app over an in-memory
//! database, request builders and record seeding.

#![allow(dead_code)]

use std::collections::BTreeSet;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use locallib_catalog::db::authors::{self, AuthorDraft};
use locallib_catalog::db::books::{self, BookDraft};
use locallib_catalog::db::{copies, genres};
use locallib_catalog::{build_router, AppState};
use locallib_common::config::Environment;
use locallib_common::db::{init_database, Author, Book, BookCopy, CopyStatus, Genre};
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Send one request through a clone of the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// App in production mode over a fresh in-memory database
pub async fn test_app() -> TestApp {
    test_app_in(Environment::Production).await
}

pub async fn test_app_in(environment: Environment) -> TestApp {
    let pool = init_database("sqlite::memory:").await.unwrap();
    let router = build_router(AppState::new(pool.clone(), environment));
    TestApp { router, pool }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// POST with an already url-encoded form body
pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Assert a 303 redirect and return its target
pub fn redirect_target(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without location")
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn seed_author(pool: &SqlitePool, first: &str, family: &str) -> Author {
    authors::insert_author(
        pool,
        AuthorDraft {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: None,
            date_of_death: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_genre(pool: &SqlitePool, name: &str) -> Genre {
    match genres::insert_genre(pool, name).await.unwrap() {
        genres::GenreWrite::Saved(genre) => genre,
        genres::GenreWrite::NameTaken(genre) => panic!("genre {} already seeded", genre.name),
    }
}

pub async fn seed_book(pool: &SqlitePool, title: &str, author: &Author, genre_ids: &[Uuid]) -> Book {
    books::insert_book(
        pool,
        BookDraft {
            title: title.to_string(),
            author_id: author.id,
            summary: format!("Summary of {}", title),
            isbn: format!("isbn-{}", title.len()),
            genre_ids: genre_ids.iter().copied().collect::<BTreeSet<_>>(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_copy(pool: &SqlitePool, book: &Book, imprint: &str, status: CopyStatus) -> BookCopy {
    let mut copy = BookCopy::new(book.id, imprint.to_string());
    copy.status = status;
    copies::insert_copy(pool, &copy).await.unwrap();
    copy
}
