//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::author::Author;

/// Book as stored; `author` holds the owning author's id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    #[sqlx(rename = "author_id")]
    pub author: Uuid,
    pub published_year: i32,
    pub genre: String,
    pub isbn: String,
}

/// Book with its author expanded inline.
/// `author` is null when the referenced author no longer exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub author: Option<Author>,
    pub published_year: i32,
    pub genre: String,
    pub isbn: String,
}

impl BookWithAuthor {
    pub fn new(book: Book, author: Option<Author>) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author,
            published_year: book.published_year,
            genre: book.genre,
            isbn: book.isbn,
        }
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    /// Id of an existing author
    pub author: Uuid,
    pub published_year: i32,
    #[validate(length(min = 1, message = "genre is required"))]
    pub genre: String,
    /// Must be unique across all books
    #[validate(length(min = 1, message = "isbn is required"))]
    pub isbn: String,
}

/// Update book request; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub author: Option<Uuid>,
    pub published_year: Option<i32>,
    #[validate(length(min = 1, message = "genre cannot be empty"))]
    pub genre: Option<String>,
    #[validate(length(min = 1, message = "isbn cannot be empty"))]
    pub isbn: Option<String>,
}
