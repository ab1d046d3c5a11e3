//! Genre persistence

use locallib_common::db::Genre;
use locallib_common::uuid_utils::{generate, parse_stored};
use locallib_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

/// Result of writing a genre under the unique-name index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreWrite {
    /// The row was written
    Saved(Genre),
    /// Another genre already has this name
    NameTaken(Genre),
}

fn genre_from_row(row: &SqliteRow) -> Result<Genre> {
    let id: String = row.try_get("id")?;
    Ok(Genre {
        id: parse_stored("genres.id", &id)?,
        name: row.try_get("name")?,
    })
}

/// All genres, ordered by name
pub async fn list_genres(pool: &SqlitePool) -> Result<Vec<Genre>> {
    let rows = sqlx::query("SELECT id, name FROM genres ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.iter().map(genre_from_row).collect()
}

pub async fn load_genre(pool: &SqlitePool, id: Uuid) -> Result<Option<Genre>> {
    let row = sqlx::query("SELECT id, name FROM genres WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(genre_from_row).transpose()
}

/// Load the given genres ordered by name; unknown ids are skipped
pub async fn load_genres_by_ids(pool: &SqlitePool, ids: &[Uuid]) -> Result<Vec<Genre>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new("SELECT id, name FROM genres WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(id.to_string());
    }
    separated.push_unseparated(") ORDER BY name");

    let rows = query.build().fetch_all(pool).await?;
    rows.iter().map(genre_from_row).collect()
}

/// Find a genre by exact name
pub async fn find_genre_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Genre>> {
    let row = sqlx::query("SELECT id, name FROM genres WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(genre_from_row).transpose()
}

/// Insert a genre unless one with the same name exists
///
/// Returns `NameTaken` with the existing row when the name is already used,
/// including when a concurrent request inserted it first.
pub async fn insert_genre(pool: &SqlitePool, name: &str) -> Result<GenreWrite> {
    let genre = Genre {
        id: generate(),
        name: name.to_string(),
    };

    let inserted = sqlx::query("INSERT INTO genres (id, name) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
        .bind(genre.id.to_string())
        .bind(&genre.name)
        .execute(pool)
        .await?
        .rows_affected();

    if inserted == 1 {
        return Ok(GenreWrite::Saved(genre));
    }

    match find_genre_by_name(pool, name).await? {
        Some(existing) => Ok(GenreWrite::NameTaken(existing)),
        // The conflicting row vanished between the two statements
        None => Err(locallib_common::Error::Conflict(format!(
            "Genre '{}' conflicted on insert but no longer exists",
            name
        ))),
    }
}

/// Insert or replace the genre with `genre.id`
pub async fn upsert_genre(pool: &SqlitePool, genre: &Genre) -> Result<GenreWrite> {
    if let Some(existing) = find_genre_by_name(pool, &genre.name).await? {
        if existing.id != genre.id {
            return Ok(GenreWrite::NameTaken(existing));
        }
    }

    let result = sqlx::query(
        r#"
        INSERT INTO genres (id, name) VALUES (?, ?)
        ON CONFLICT(id) DO UPDATE SET name = excluded.name
        "#,
    )
    .bind(genre.id.to_string())
    .bind(&genre.name)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(GenreWrite::Saved(genre.clone())),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            match find_genre_by_name(pool, &genre.name).await? {
                Some(existing) => Ok(GenreWrite::NameTaken(existing)),
                None => Err(sqlx::Error::Database(db_err).into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a genre; returns whether a row was removed
///
/// Callers check for referencing books first.
pub async fn delete_genre(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let removed = sqlx::query("DELETE FROM genres WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?
        .rows_affected();

    Ok(removed > 0)
}

pub async fn count_genres(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM genres")
        .fetch_one(pool)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use locallib_common::db::init_database;

    async fn saved(pool: &SqlitePool, name: &str) -> Genre {
        match insert_genre(pool, name).await.unwrap() {
            GenreWrite::Saved(genre) => genre,
            other => panic!("expected insert, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_insert_duplicate_returns_existing() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let first = saved(&pool, "Fantasy").await;

        let second = insert_genre(&pool, "Fantasy").await.unwrap();
        assert_eq!(second, GenreWrite::NameTaken(first));
        assert_eq!(count_genres(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        saved(&pool, "Poetry").await;
        saved(&pool, "Fantasy").await;
        saved(&pool, "Mystery").await;

        let names: Vec<String> = list_genres(&pool).await.unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Fantasy", "Mystery", "Poetry"]);
    }

    #[tokio::test]
    async fn test_upsert_renames_in_place() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let mut genre = saved(&pool, "Sci-fi").await;
        genre.name = "Science Fiction".to_string();

        assert_eq!(upsert_genre(&pool, &genre).await.unwrap(), GenreWrite::Saved(genre.clone()));
        let loaded = load_genre(&pool, genre.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Science Fiction");
    }

    #[tokio::test]
    async fn test_upsert_refuses_taken_name() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let poetry = saved(&pool, "Poetry").await;
        let mut other = saved(&pool, "Drama").await;
        other.name = "Poetry".to_string();

        assert_eq!(upsert_genre(&pool, &other).await.unwrap(), GenreWrite::NameTaken(poetry));
    }

    #[tokio::test]
    async fn test_upsert_creates_missing_id() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let genre = Genre {
            id: Uuid::new_v4(),
            name: "Horror".to_string(),
        };

        upsert_genre(&pool, &genre).await.unwrap();
        assert_eq!(load_genre(&pool, genre.id).await.unwrap(), Some(genre));
    }

    #[tokio::test]
    async fn test_delete_genre() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let genre = saved(&pool, "Poetry").await;

        assert!(delete_genre(&pool, genre.id).await.unwrap());
        assert!(!delete_genre(&pool, genre.id).await.unwrap());
        assert!(load_genre(&pool, genre.id).await.unwrap().is_none());
    }
}
