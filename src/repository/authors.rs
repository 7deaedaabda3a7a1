//! Authors repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, CreateAuthor, ListQuery, UpdateAuthor},
};

/// Storage operations over the authors collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// One page of authors matching the query, plus the total match count
    async fn list(&self, query: &ListQuery) -> AppResult<(Vec<Author>, i64)>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Author>;

    /// Fetch every author whose id is in `ids`; unknown ids are skipped
    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>>;

    async fn create(&self, data: &CreateAuthor) -> AppResult<Author>;

    async fn update(&self, id: Uuid, data: &UpdateAuthor) -> AppResult<Author>;

    /// Delete the author and every book referencing it, atomically.
    /// Returns the number of books removed; a missing author is not an error.
    async fn delete_with_books(&self, id: Uuid) -> AppResult<u64>;

    /// Remove every author. Books must be cleared first.
    async fn delete_all(&self) -> AppResult<u64>;
}

const SELECT_AUTHOR: &str = r#"
    SELECT a.id, a.name, a.birthdate, a.nationality,
           ARRAY(
               SELECT b.id FROM books b
               WHERE b.author_id = a.id
               ORDER BY b.created_at, b.id
           ) AS books
    FROM authors a
"#;

fn not_found() -> AppError {
    AppError::NotFound("Author not found".to_string())
}

#[derive(Clone)]
pub struct PgAuthorRepository {
    pool: Pool<Postgres>,
}

impl PgAuthorRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    async fn list(&self, query: &ListQuery) -> AppResult<(Vec<Author>, i64)> {
        let pattern = query.search_pattern();

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM authors WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "{} WHERE ($1::text IS NULL OR a.name ILIKE $1) ORDER BY a.created_at, a.id LIMIT $2 OFFSET $3",
            SELECT_AUTHOR
        );
        let authors = sqlx::query_as::<_, Author>(&sql)
            .bind(&pattern)
            .bind(query.limit())
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((authors, total))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Author> {
        let sql = format!("{} WHERE a.id = $1", SELECT_AUTHOR);
        sqlx::query_as::<_, Author>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("{} WHERE a.id = ANY($1)", SELECT_AUTHOR);
        let authors = sqlx::query_as::<_, Author>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(authors)
    }

    async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, name, birthdate, nationality)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, birthdate, nationality, ARRAY[]::uuid[] AS books
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(data.birthdate)
        .bind(&data.nationality)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    async fn update(&self, id: Uuid, data: &UpdateAuthor) -> AppResult<Author> {
        let updated: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE authors
            SET name = COALESCE($2, name),
                birthdate = COALESCE($3, birthdate),
                nationality = COALESCE($4, nationality),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.birthdate)
        .bind(&data.nationality)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => self.get_by_id(id).await,
            None => Err(not_found()),
        }
    }

    async fn delete_with_books(&self, id: Uuid) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        // Blocks book inserts for this author until commit
        sqlx::query("SELECT id FROM authors WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let books = sqlx::query("DELETE FROM books WHERE author_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(books)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM authors").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
