//! Tests for store initialization

use locallib_common::db::init::init_database;

async fn table_names(pool: &sqlx::SqlitePool) -> Vec<String> {
    sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .fetch_all(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_memory_database_has_catalog_tables() {
    let pool = init_database("sqlite::memory:").await.unwrap();

    let tables = table_names(&pool).await;
    for expected in ["authors", "book_copies", "book_genres", "books", "genres"] {
        assert!(tables.iter().any(|t| t == expected), "missing table {}", expected);
    }
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("library.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = init_database(&url).await.unwrap();
    pool.close().await;

    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("library.db").display());

    let first = init_database(&url).await.unwrap();
    sqlx::query("INSERT INTO genres (id, name) VALUES ('g1', 'Poetry')")
        .execute(&first)
        .await
        .unwrap();
    first.close().await;

    // Schema creation is idempotent and keeps existing rows
    let second = init_database(&url).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
        .fetch_one(&second)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_genre_names_are_unique() {
    let pool = init_database("sqlite::memory:").await.unwrap();

    sqlx::query("INSERT INTO genres (id, name) VALUES ('g1', 'Poetry')")
        .execute(&pool)
        .await
        .unwrap();
    let duplicate = sqlx::query("INSERT INTO genres (id, name) VALUES ('g2', 'Poetry')")
        .execute(&pool)
        .await;

    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_copy_status_defaults_to_maintenance() {
    let pool = init_database("sqlite::memory:").await.unwrap();

    sqlx::query("INSERT INTO authors (id, first_name, family_name) VALUES ('a1', 'Ann', 'Leckie')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO books (id, title, author_id, summary, isbn) VALUES ('b1', 'Ancillary Justice', 'a1', 's', 'i')",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO book_copies (id, book_id, imprint) VALUES ('c1', 'b1', 'Orbit')")
        .execute(&pool)
        .await
        .unwrap();

    let status: String = sqlx::query_scalar("SELECT status FROM book_copies WHERE id = 'c1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, "Maintenance");
}

