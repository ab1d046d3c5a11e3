//! Book persistence
//!
//! A book's genre set lives in the `book_genres` link table and is attached
//! after the main row is read.

use std::collections::{BTreeSet, HashMap};

use locallib_common::db::Book;
use locallib_common::uuid_utils::{generate, parse_stored};
use locallib_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

/// Field values for a book that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: BTreeSet<Uuid>,
}

const BOOK_COLUMNS: &str =
    "b.id AS id, b.title AS title, b.author_id AS author_id, b.summary AS summary, b.isbn AS isbn";

fn book_from_row(row: &SqliteRow) -> Result<Book> {
    let id: String = row.try_get("id")?;
    let author_id: String = row.try_get("author_id")?;
    Ok(Book {
        id: parse_stored("books.id", &id)?,
        title: row.try_get("title")?,
        author_id: parse_stored("books.author_id", &author_id)?,
        summary: row.try_get("summary")?,
        isbn: row.try_get("isbn")?,
        genre_ids: BTreeSet::new(),
    })
}

/// Fill in `genre_ids` for each book with one query over the link table
async fn attach_genres(pool: &SqlitePool, mut books: Vec<Book>) -> Result<Vec<Book>> {
    if books.is_empty() {
        return Ok(books);
    }

    let mut query =
        QueryBuilder::<Sqlite>::new("SELECT book_id, genre_id FROM book_genres WHERE book_id IN (");
    let mut separated = query.separated(", ");
    for book in &books {
        separated.push_bind(book.id.to_string());
    }
    separated.push_unseparated(")");

    let rows = query.build().fetch_all(pool).await?;

    let mut by_book: HashMap<Uuid, BTreeSet<Uuid>> = HashMap::new();
    for row in &rows {
        let book_id: String = row.try_get("book_id")?;
        let genre_id: String = row.try_get("genre_id")?;
        by_book
            .entry(parse_stored("book_genres.book_id", &book_id)?)
            .or_default()
            .insert(parse_stored("book_genres.genre_id", &genre_id)?);
    }

    for book in &mut books {
        if let Some(genres) = by_book.remove(&book.id) {
            book.genre_ids = genres;
        }
    }
    Ok(books)
}

async fn fetch_books(pool: &SqlitePool, rows: Vec<SqliteRow>) -> Result<Vec<Book>> {
    let books = rows.iter().map(book_from_row).collect::<Result<Vec<_>>>()?;
    attach_genres(pool, books).await
}

/// All books, ordered by title
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>> {
    let rows = sqlx::query(&format!("SELECT {} FROM books b ORDER BY b.title", BOOK_COLUMNS))
        .fetch_all(pool)
        .await?;

    fetch_books(pool, rows).await
}

pub async fn load_book(pool: &SqlitePool, id: Uuid) -> Result<Option<Book>> {
    let row = sqlx::query(&format!("SELECT {} FROM books b WHERE b.id = ?", BOOK_COLUMNS))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(fetch_books(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Load several books at once, keyed by id; unknown ids are simply absent
pub async fn load_books_by_ids(pool: &SqlitePool, ids: &[Uuid]) -> Result<HashMap<Uuid, Book>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {} FROM books b WHERE b.id IN (",
        BOOK_COLUMNS
    ));
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(id.to_string());
    }
    separated.push_unseparated(")");

    let rows = query.build().fetch_all(pool).await?;
    Ok(fetch_books(pool, rows)
        .await?
        .into_iter()
        .map(|book| (book.id, book))
        .collect())
}

/// Books written by one author, ordered by title
pub async fn list_books_by_author(pool: &SqlitePool, author_id: Uuid) -> Result<Vec<Book>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM books b WHERE b.author_id = ? ORDER BY b.title",
        BOOK_COLUMNS
    ))
    .bind(author_id.to_string())
    .fetch_all(pool)
    .await?;

    fetch_books(pool, rows).await
}

/// Books whose genre set contains `genre_id`, ordered by title
pub async fn list_books_by_genre(pool: &SqlitePool, genre_id: Uuid) -> Result<Vec<Book>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {} FROM books b
        JOIN book_genres bg ON bg.book_id = b.id
        WHERE bg.genre_id = ?
        ORDER BY b.title
        "#,
        BOOK_COLUMNS
    ))
    .bind(genre_id.to_string())
    .fetch_all(pool)
    .await?;

    fetch_books(pool, rows).await
}

/// Find a book with the same title, author and ISBN as the draft
pub async fn find_book(pool: &SqlitePool, draft: &BookDraft) -> Result<Option<Book>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM books b WHERE b.title = ? AND b.author_id = ? AND b.isbn = ? LIMIT 1",
        BOOK_COLUMNS
    ))
    .bind(&draft.title)
    .bind(draft.author_id.to_string())
    .bind(&draft.isbn)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(fetch_books(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Store a new book together with its genre links
pub async fn insert_book(pool: &SqlitePool, draft: BookDraft) -> Result<Book> {
    let book = Book {
        id: generate(),
        title: draft.title,
        author_id: draft.author_id,
        summary: draft.summary,
        isbn: draft.isbn,
        genre_ids: draft.genre_ids,
    };

    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO books (id, title, author_id, summary, isbn) VALUES (?, ?, ?, ?, ?)")
        .bind(book.id.to_string())
        .bind(&book.title)
        .bind(book.author_id.to_string())
        .bind(&book.summary)
        .bind(&book.isbn)
        .execute(&mut *tx)
        .await?;

    for genre_id in &book.genre_ids {
        sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES (?, ?)")
            .bind(book.id.to_string())
            .bind(genre_id.to_string())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(book)
}

pub async fn count_books(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?)
}
