//! Book copy and home page integration tests

mod helpers;

use axum::http::StatusCode;
use helpers::*;
use locallib_common::db::CopyStatus;
use uuid::Uuid;

#[tokio::test]
async fn test_copy_list_resolves_book_titles() {
    let app = test_app().await;
    let author = seed_author(&app.pool, "Frank", "Herbert").await;
    let book = seed_book(&app.pool, "Dune", &author, &[]).await;
    seed_copy(&app.pool, &book, "Ace, 1990", CopyStatus::Available).await;
    seed_copy(&app.pool, &book, "Chilton, 1965", CopyStatus::Reserved).await;

    let response = app.send(get("/catalog/bookinstances")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Dune : Ace, 1990</a> - <span class=\"text-success\">Available</span></li>"));
    assert!(body.contains("Dune : Chilton, 1965</a> - <span class=\"text-warning\">Reserved</span>"));
    assert_eq!(body.matches("(Due: ").count(), 1);
}

#[tokio::test]
async fn test_copy_detail_links_to_book() {
    let app = test_app().await;
    let author = seed_author(&app.pool, "Frank", "Herbert").await;
    let book = seed_book(&app.pool, "Dune", &author, &[]).await;
    let copy = seed_copy(&app.pool, &book, "Ace, 1990", CopyStatus::Maintenance).await;

    let body = body_text(app.send(get(&copy.url())).await).await;
    assert!(body.contains(&format!("<h1>ID: {}</h1>", copy.id)));
    assert!(body.contains(&format!("<a href=\"{}\">Dune</a>", book.url())));
    assert!(body.contains("<span class=\"text-danger\">Maintenance</span>"));
    assert!(body.contains(&format!("Due back:</strong> {}", copy.due_back_formatted())));
}

#[tokio::test]
async fn test_missing_copy_is_404() {
    let app = test_app().await;

    let response = app
        .send(get(&format!("/catalog/bookinstance/{}", Uuid::new_v4())))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Book copy not found"));
}

#[tokio::test]
async fn test_home_page_counts() {
    let app = test_app().await;
    let author = seed_author(&app.pool, "Frank", "Herbert").await;
    seed_genre(&app.pool, "Science Fiction").await;
    let dune = seed_book(&app.pool, "Dune", &author, &[]).await;
    seed_book(&app.pool, "Children of Dune", &author, &[]).await;
    seed_copy(&app.pool, &dune, "Ace", CopyStatus::Available).await;
    seed_copy(&app.pool, &dune, "Chilton", CopyStatus::Loaned).await;
    seed_copy(&app.pool, &dune, "Hodder", CopyStatus::Maintenance).await;

    let response = app.send(get("/catalog/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("<strong>Books:</strong> 2"));
    assert!(body.contains("<strong>Copies:</strong> 3"));
    assert!(body.contains("<strong>Copies available:</strong> 1"));
    assert!(body.contains("<strong>Authors:</strong> 1"));
    assert!(body.contains("<strong>Genres:</strong> 1"));
    assert!(!body.contains("Error:"));
}

#[tokio::test]
async fn test_home_page_survives_store_failure() {
    let app = test_app().await;
    app.pool.close().await;

    let response = app.send(get("/catalog")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Error: "));
    assert!(body.contains("<strong>Books:</strong> unavailable"));
}
