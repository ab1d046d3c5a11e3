//! Author persistence

use std::collections::HashMap;

use chrono::NaiveDate;
use locallib_common::db::Author;
use locallib_common::uuid_utils::{generate, parse_stored};
use locallib_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use super::{date_from_text, date_to_text};

/// Field values for an author that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

const AUTHOR_COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";

fn author_from_row(row: &SqliteRow) -> Result<Author> {
    let id: String = row.try_get("id")?;
    Ok(Author {
        id: parse_stored("authors.id", &id)?,
        first_name: row.try_get("first_name")?,
        family_name: row.try_get("family_name")?,
        date_of_birth: date_from_text("authors.date_of_birth", row.try_get("date_of_birth")?)?,
        date_of_death: date_from_text("authors.date_of_death", row.try_get("date_of_death")?)?,
    })
}

/// All authors, ordered by family name
pub async fn list_authors(pool: &SqlitePool) -> Result<Vec<Author>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM authors ORDER BY family_name, first_name",
        AUTHOR_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(author_from_row).collect()
}

/// Load one author by id
pub async fn load_author(pool: &SqlitePool, id: Uuid) -> Result<Option<Author>> {
    let row = sqlx::query(&format!("SELECT {} FROM authors WHERE id = ?", AUTHOR_COLUMNS))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(author_from_row).transpose()
}

/// Load several authors at once, keyed by id; unknown ids are simply absent
pub async fn load_authors_by_ids(pool: &SqlitePool, ids: &[Uuid]) -> Result<HashMap<Uuid, Author>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {} FROM authors WHERE id IN (",
        AUTHOR_COLUMNS
    ));
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(id.to_string());
    }
    separated.push_unseparated(")");

    let rows = query.build().fetch_all(pool).await?;
    rows.iter()
        .map(|row| author_from_row(row).map(|author| (author.id, author)))
        .collect()
}

/// Find an author whose names and dates all match the draft exactly
pub async fn find_author(pool: &SqlitePool, draft: &AuthorDraft) -> Result<Option<Author>> {
    // IS rather than = so that two missing dates compare equal
    let row = sqlx::query(&format!(
        r#"
        SELECT {} FROM authors
        WHERE first_name = ? AND family_name = ?
          AND date_of_birth IS ? AND date_of_death IS ?
        LIMIT 1
        "#,
        AUTHOR_COLUMNS
    ))
    .bind(&draft.first_name)
    .bind(&draft.family_name)
    .bind(date_to_text(draft.date_of_birth))
    .bind(date_to_text(draft.date_of_death))
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(author_from_row).transpose()
}

/// Store a new author and return it with its assigned id
pub async fn insert_author(pool: &SqlitePool, draft: AuthorDraft) -> Result<Author> {
    let author = Author {
        id: generate(),
        first_name: draft.first_name,
        family_name: draft.family_name,
        date_of_birth: draft.date_of_birth,
        date_of_death: draft.date_of_death,
    };

    sqlx::query(
        r#"
        INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(author.id.to_string())
    .bind(&author.first_name)
    .bind(&author.family_name)
    .bind(date_to_text(author.date_of_birth))
    .bind(date_to_text(author.date_of_death))
    .execute(pool)
    .await?;

    Ok(author)
}

pub async fn count_authors(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(pool)
        .await?)
}
