//! Database initialization
//!
//! Opens the catalog store and creates the record tables if they are missing.
//! Safe to run on every startup.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Open the store at `database_url` and make sure the schema exists
///
/// Accepts any sqlx SQLite URL. File databases are created on first use
/// (including their parent directory); `sqlite::memory:` opens a private
/// in-memory store held by a single connection.
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| Error::Config(format!("Invalid database URL {}: {}", database_url, e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let pool = if in_memory {
        // Every connection to :memory: is a separate database, so pin one
        // connection for the pool's whole lifetime.
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        let filename = options.get_filename().to_path_buf();
        if let Some(parent) = filename.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let newly_created = !filename.exists();

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await?;

        if newly_created {
            info!("Initialized new database: {}", filename.display());
        } else {
            info!("Opened existing database: {}", filename.display());
        }
        pool
    };

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all catalog tables and indexes (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_authors_table(pool).await?;
    create_genres_table(pool).await?;
    create_books_table(pool).await?;
    create_book_genres_table(pool).await?;
    create_book_copies_table(pool).await?;
    Ok(())
}

async fn create_authors_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            family_name TEXT NOT NULL,
            date_of_birth TEXT,
            date_of_death TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_authors_family_name ON authors(family_name)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Genre names are unique at the store level so two concurrent creates of the
/// same name cannot both succeed.
async fn create_genres_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_genres_name ON genres(name)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_books_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            author_id TEXT NOT NULL REFERENCES authors(id),
            summary TEXT NOT NULL,
            isbn TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_author ON books(author_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_title ON books(title)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Link table holding each book's genre set
async fn create_book_genres_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book_genres (
            book_id TEXT NOT NULL REFERENCES books(id) ON DELETE CASCADE,
            genre_id TEXT NOT NULL REFERENCES genres(id),
            PRIMARY KEY (book_id, genre_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_book_genres_genre ON book_genres(genre_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_book_copies_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book_copies (
            id TEXT PRIMARY KEY,
            book_id TEXT NOT NULL REFERENCES books(id),
            imprint TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'Maintenance'
                CHECK (status IN ('Available', 'Maintenance', 'Loaned', 'Reserved')),
            due_back TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_book_copies_book ON book_copies(book_id)")
        .execute(pool)
        .await?;

    Ok(())
}

