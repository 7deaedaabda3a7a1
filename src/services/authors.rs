//! Author management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Author, AuthorWithBooks, CreateAuthor, ListQuery, UpdateAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List authors with pagination and name search
    pub async fn list(&self, query: &ListQuery) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.list(query).await
    }

    /// Get an author with its books expanded
    pub async fn get(&self, id: Uuid) -> AppResult<AuthorWithBooks> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.books.list_by_author(id).await?;
        Ok(AuthorWithBooks::new(author, books))
    }

    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self.repository.authors.create(data).await?;
        tracing::info!("Created author id={}", author.id);
        Ok(author)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateAuthor) -> AppResult<Author> {
        data.validate()?;
        self.repository.authors.update(id, data).await
    }

    /// Delete an author together with every book it wrote.
    /// Deleting an unknown id succeeds.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let books = self.repository.authors.delete_with_books(id).await?;
        tracing::info!("Deleted author id={} and {} book(s)", id, books);
        Ok(())
    }
}
