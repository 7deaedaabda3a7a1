//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{book::Book, deserialize_date, deserialize_optional_date};

/// Author as stored, with the ids of the books that reference it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub birthdate: NaiveDate,
    pub nationality: String,
    /// Ids of books whose `author` is this author
    pub books: Vec<Uuid>,
}

/// Author with its books expanded inline
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorWithBooks {
    pub id: Uuid,
    pub name: String,
    pub birthdate: NaiveDate,
    pub nationality: String,
    pub books: Vec<Book>,
}

impl AuthorWithBooks {
    pub fn new(author: Author, books: Vec<Book>) -> Self {
        Self {
            id: author.id,
            name: author.name,
            birthdate: author.birthdate,
            nationality: author.nationality,
            books,
        }
    }
}

/// Create author request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub birthdate: NaiveDate,
    #[validate(length(min = 1, message = "nationality is required"))]
    pub nationality: String,
}

/// Update author request; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub birthdate: Option<NaiveDate>,
    #[validate(length(min = 1, message = "nationality cannot be empty"))]
    pub nationality: Option<String>,
}
