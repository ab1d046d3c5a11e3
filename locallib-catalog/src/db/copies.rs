//! Book copy persistence

use locallib_common::db::{BookCopy, CopyStatus};
use locallib_common::uuid_utils::parse_stored;
use locallib_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::timestamp_from_text;

const COPY_COLUMNS: &str = "id, book_id, imprint, status, due_back";

fn copy_from_row(row: &SqliteRow) -> Result<BookCopy> {
    let id: String = row.try_get("id")?;
    let book_id: String = row.try_get("book_id")?;
    let status: String = row.try_get("status")?;
    let due_back: String = row.try_get("due_back")?;
    Ok(BookCopy {
        id: parse_stored("book_copies.id", &id)?,
        book_id: parse_stored("book_copies.book_id", &book_id)?,
        imprint: row.try_get("imprint")?,
        status: status.parse()?,
        due_back: timestamp_from_text("book_copies.due_back", &due_back)?,
    })
}

/// All copies, soonest due first
pub async fn list_copies(pool: &SqlitePool) -> Result<Vec<BookCopy>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM book_copies ORDER BY due_back, imprint",
        COPY_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(copy_from_row).collect()
}

pub async fn load_copy(pool: &SqlitePool, id: Uuid) -> Result<Option<BookCopy>> {
    let row = sqlx::query(&format!("SELECT {} FROM book_copies WHERE id = ?", COPY_COLUMNS))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(copy_from_row).transpose()
}

/// Copies of one book
pub async fn list_copies_for_book(pool: &SqlitePool, book_id: Uuid) -> Result<Vec<BookCopy>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM book_copies WHERE book_id = ? ORDER BY due_back, imprint",
        COPY_COLUMNS
    ))
    .bind(book_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(copy_from_row).collect()
}

pub async fn insert_copy(pool: &SqlitePool, copy: &BookCopy) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO book_copies (id, book_id, imprint, status, due_back)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(copy.id.to_string())
    .bind(copy.book_id.to_string())
    .bind(&copy.imprint)
    .bind(copy.status.as_str())
    .bind(copy.due_back.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn count_copies(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM book_copies")
        .fetch_one(pool)
        .await?)
}

pub async fn count_copies_with_status(pool: &SqlitePool, status: CopyStatus) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM book_copies WHERE status = ?")
        .bind(status.as_str())
        .fetch_one(pool)
        .await?)
}
