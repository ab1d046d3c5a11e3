//! Routing and HTTP plumbing integration tests
//!
//! Placeholder routes, redirects, the 404 and 500 pages, health, the
//! stylesheet and response headers.

mod helpers;

use axum::http::{header, StatusCode};
use helpers::*;
use locallib_common::config::Environment;
use serde_json::Value;
use uuid::Uuid;

#[tokio::test]
async fn test_unimplemented_routes_answer_placeholder_text() {
    let app = test_app().await;
    let id = Uuid::new_v4();

    let cases = [
        ("GET", format!("/catalog/author/{}/delete", id), "Author delete GET"),
        ("POST", format!("/catalog/author/{}/update", id), "Author update POST"),
        ("GET", format!("/catalog/book/{}/update", id), "Book update GET"),
        ("POST", format!("/catalog/book/{}/delete", id), "Book delete POST"),
        ("GET", "/catalog/bookinstance/create".to_string(), "BookInstance create GET"),
        ("POST", "/catalog/bookinstance/create".to_string(), "BookInstance create POST"),
        ("GET", format!("/catalog/bookinstance/{}/delete", id), "BookInstance delete GET"),
        ("POST", format!("/catalog/bookinstance/{}/update", id), "BookInstance update POST"),
    ];

    for (method, uri, expected) in cases {
        let request = if method == "GET" { get(&uri) } else { post_form(&uri, "") };
        let response = app.send(request).await;
        assert_eq!(response.status(), StatusCode::OK, "{} {}", method, uri);

        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body_text(response).await, format!("NOT IMPLEMENTED: {}", expected));
    }
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = test_app().await;
    let response = app.send(get("/")).await;
    assert_eq!(redirect_target(&response), "/catalog/");
}

#[tokio::test]
async fn test_users_placeholder() {
    let app = test_app().await;
    let response = app.send(get("/users")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "respond with a resource");
}

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let app = test_app().await;

    let response = app.send(get("/catalog/nothing/here")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(body_text(response).await.contains("<h1>Page not found</h1>"));
}

#[tokio::test]
async fn test_health_reports_reachable_store() {
    let app = test_app_in(Environment::Development).await;

    let response = app.send(get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "locallib-catalog");
    assert!(body["version"].is_string());
    assert_eq!(body["environment"], "development");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let app = test_app().await;
    app.pool.close().await;

    let response = app.send(get("/health")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "unreachable");
}

#[tokio::test]
async fn test_stylesheet_and_security_headers() {
    let app = test_app().await;

    let response = app.send(get("/stylesheets/style.css")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "SAMEORIGIN");
    assert!(body_text(response).await.contains(".sidebar-nav"));
}

#[tokio::test]
async fn test_store_failure_hides_detail_in_production() {
    let app = test_app_in(Environment::Production).await;
    app.pool.close().await;

    let response = app.send(get("/catalog/genres")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_text(response).await;
    assert!(body.contains("<h1>Internal Server Error</h1>"));
    assert!(!body.contains("error-detail"));
}

#[tokio::test]
async fn test_store_failure_shows_detail_in_development() {
    let app = test_app_in(Environment::Development).await;
    app.pool.close().await;

    let response = app.send(get("/catalog/genres")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_text(response).await;
    assert!(body.contains("error-detail"));
    assert!(body.contains("PoolClosed"));
}
