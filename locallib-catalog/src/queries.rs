//! Page-level queries
//!
//! Combines the per-table functions in [`crate::db`] into what each page
//! needs: lists with their references resolved, and detail pages whose
//! independent lookups run concurrently. Every reference must resolve; a
//! dangling one surfaces as `NotFound` rather than a panic.

use locallib_common::db::{Author, Book, BookCopy, CopyStatus, Genre};
use sqlx::SqlitePool;
use tracing::error;
use uuid::Uuid;

use crate::db::{authors, books, copies, genres};
use crate::error::{CatalogError, CatalogResult};

/// A book with its author resolved
#[derive(Debug, Clone)]
pub struct BookListing {
    pub book: Book,
    pub author: Author,
}

/// A copy carrying its parent book
#[derive(Debug, Clone)]
pub struct CopyListing {
    pub copy: BookCopy,
    pub book: Book,
}

#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Author,
    pub genres: Vec<Genre>,
    pub copies: Vec<CopyListing>,
}

/// A genre and the books filed under it
///
/// Also backs the delete confirmation, where `books` are the dependents that
/// block deletion.
#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<Book>,
}

/// Record counts for the home page
///
/// Each count is independent; a count that failed is `None` and the first
/// failure is kept in `error` for display.
#[derive(Debug, Clone, Default)]
pub struct HomeCounts {
    pub books: Option<i64>,
    pub copies: Option<i64>,
    pub copies_available: Option<i64>,
    pub authors: Option<i64>,
    pub genres: Option<i64>,
    pub error: Option<String>,
}

pub async fn require_author(pool: &SqlitePool, id: Uuid) -> CatalogResult<Author> {
    authors::load_author(pool, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Author"))
}

pub async fn require_book(pool: &SqlitePool, id: Uuid) -> CatalogResult<Book> {
    books::load_book(pool, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Book"))
}

pub async fn require_genre(pool: &SqlitePool, id: Uuid) -> CatalogResult<Genre> {
    genres::load_genre(pool, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Genre"))
}

pub async fn require_copy(pool: &SqlitePool, id: Uuid) -> CatalogResult<BookCopy> {
    copies::load_copy(pool, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Book copy"))
}

pub async fn author_list(pool: &SqlitePool) -> CatalogResult<Vec<Author>> {
    Ok(authors::list_authors(pool).await?)
}

pub async fn genre_list(pool: &SqlitePool) -> CatalogResult<Vec<Genre>> {
    Ok(genres::list_genres(pool).await?)
}

/// All books by title, each with its author
pub async fn book_list(pool: &SqlitePool) -> CatalogResult<Vec<BookListing>> {
    let all_books = books::list_books(pool).await?;

    let mut author_ids: Vec<Uuid> = all_books.iter().map(|b| b.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let by_id = authors::load_authors_by_ids(pool, &author_ids).await?;

    all_books
        .into_iter()
        .map(|book| {
            let author = by_id
                .get(&book.author_id)
                .cloned()
                .ok_or_else(|| CatalogError::not_found("Author"))?;
            Ok(BookListing { book, author })
        })
        .collect()
}

/// All copies, each with its parent book
pub async fn copy_list(pool: &SqlitePool) -> CatalogResult<Vec<CopyListing>> {
    let all_copies = copies::list_copies(pool).await?;

    let mut book_ids: Vec<Uuid> = all_copies.iter().map(|c| c.book_id).collect();
    book_ids.sort_unstable();
    book_ids.dedup();
    let by_id = books::load_books_by_ids(pool, &book_ids).await?;

    all_copies
        .into_iter()
        .map(|copy| {
            let book = by_id
                .get(&copy.book_id)
                .cloned()
                .ok_or_else(|| CatalogError::not_found("Book"))?;
            Ok(CopyListing { copy, book })
        })
        .collect()
}

pub async fn author_detail(pool: &SqlitePool, id: Uuid) -> CatalogResult<AuthorDetail> {
    let (author, books) = tokio::try_join!(require_author(pool, id), async {
        books::list_books_by_author(pool, id)
            .await
            .map_err(CatalogError::from)
    })?;

    Ok(AuthorDetail { author, books })
}

pub async fn genre_detail(pool: &SqlitePool, id: Uuid) -> CatalogResult<GenreDetail> {
    let (genre, books) = tokio::try_join!(require_genre(pool, id), async {
        books::list_books_by_genre(pool, id)
            .await
            .map_err(CatalogError::from)
    })?;

    Ok(GenreDetail { genre, books })
}

/// Book with author and genres resolved, plus every copy of it
pub async fn book_detail(pool: &SqlitePool, id: Uuid) -> CatalogResult<BookDetail> {
    let resolved_book = async {
        let book = require_book(pool, id).await?;
        let genre_ids: Vec<Uuid> = book.genre_ids.iter().copied().collect();
        let (author, genres) = tokio::try_join!(require_author(pool, book.author_id), async {
            genres::load_genres_by_ids(pool, &genre_ids)
                .await
                .map_err(CatalogError::from)
        })?;
        Ok::<_, CatalogError>((book, author, genres))
    };
    let book_copies = async {
        copies::list_copies_for_book(pool, id)
            .await
            .map_err(CatalogError::from)
    };

    let ((book, author, genres), book_copies) = tokio::try_join!(resolved_book, book_copies)?;

    let copies = book_copies
        .into_iter()
        .map(|copy| CopyListing {
            copy,
            book: book.clone(),
        })
        .collect();

    Ok(BookDetail {
        book,
        author,
        genres,
        copies,
    })
}

pub async fn copy_detail(pool: &SqlitePool, id: Uuid) -> CatalogResult<CopyListing> {
    let copy = require_copy(pool, id).await?;
    let book = require_book(pool, copy.book_id).await?;
    Ok(CopyListing { copy, book })
}

/// Authors and genres for the book form's choices
pub async fn book_form_choices(pool: &SqlitePool) -> CatalogResult<(Vec<Author>, Vec<Genre>)> {
    tokio::try_join!(author_list(pool), genre_list(pool))
}

/// Count everything for the home page without failing the page
pub async fn home_counts(pool: &SqlitePool) -> HomeCounts {
    let (book_count, copy_count, available_count, author_count, genre_count) = tokio::join!(
        books::count_books(pool),
        copies::count_copies(pool),
        copies::count_copies_with_status(pool, CopyStatus::Available),
        authors::count_authors(pool),
        genres::count_genres(pool),
    );

    let mut counts = HomeCounts::default();
    let mut first_error = None;
    for (slot, result) in [
        (&mut counts.books, book_count),
        (&mut counts.copies, copy_count),
        (&mut counts.copies_available, available_count),
        (&mut counts.authors, author_count),
        (&mut counts.genres, genre_count),
    ] {
        match result {
            Ok(n) => *slot = Some(n),
            Err(e) => {
                error!("Home page count failed: {}", e);
                first_error.get_or_insert_with(|| e.to_string());
            }
        }
    }
    counts.error = first_error;
    counts
}
