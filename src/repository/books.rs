//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, ListQuery, UpdateBook},
};

/// Storage operations over the books collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// One page of books matching the query, plus the total match count
    async fn list(&self, query: &ListQuery) -> AppResult<(Vec<Book>, i64)>;

    /// All books referencing the given author, oldest first
    async fn list_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Book>;

    async fn create(&self, data: &CreateBook) -> AppResult<Book>;

    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book>;

    /// Returns whether a book was actually removed
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    async fn delete_all(&self) -> AppResult<u64>;
}

const BOOK_COLUMNS: &str = "id, title, author_id, published_year, genre, isbn";

fn not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

/// UPDATE statement touching only the supplied fields.
/// `$1` is the id; the remaining placeholders follow field order.
fn update_query(data: &UpdateBook) -> String {
    let mut sets = vec!["updated_at = NOW()".to_string()];

    macro_rules! add_field {
        ($field:expr, $name:expr) => {
            if $field.is_some() {
                let idx = sets.len() + 1;
                sets.push(format!("{} = ${}", $name, idx));
            }
        };
    }

    add_field!(data.title, "title");
    add_field!(data.author, "author_id");
    add_field!(data.published_year, "published_year");
    add_field!(data.genre, "genre");
    add_field!(data.isbn, "isbn");

    format!(
        "UPDATE books SET {} WHERE id = $1 RETURNING {BOOK_COLUMNS}",
        sets.join(", ")
    )
}

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list(&self, query: &ListQuery) -> AppResult<(Vec<Book>, i64)> {
        let pattern = query.search_pattern();

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM books WHERE ($1::text IS NULL OR title ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            r#"
            SELECT {BOOK_COLUMNS} FROM books
            WHERE ($1::text IS NULL OR title ILIKE $1)
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#
        );
        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(&pattern)
            .bind(query.limit())
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    async fn list_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE author_id = $1 ORDER BY created_at, id"
        );
        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let sql = format!(
            r#"
            INSERT INTO books (id, title, author_id, published_year, genre, isbn)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {BOOK_COLUMNS}
            "#
        );
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(Uuid::new_v4())
            .bind(&data.title)
            .bind(data.author)
            .bind(data.published_year)
            .bind(&data.genre)
            .bind(&data.isbn)
            .fetch_one(&self.pool)
            .await?;
        Ok(book)
    }

    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        let query = update_query(data);
        let mut builder = sqlx::query_as::<_, Book>(&query).bind(id);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.title);
        bind_field!(data.author);
        bind_field!(data.published_year);
        bind_field!(data.genre);
        bind_field!(data.isbn);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
