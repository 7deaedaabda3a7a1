//! Book management service

use std::collections::HashMap;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookWithAuthor, CreateBook, ListQuery, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books with pagination and title search, authors expanded
    pub async fn list(&self, query: &ListQuery) -> AppResult<(Vec<BookWithAuthor>, i64)> {
        let (books, total) = self.repository.books.list(query).await?;

        let mut author_ids: Vec<Uuid> = books.iter().map(|b| b.author).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<Uuid, _> = self
            .repository
            .authors
            .get_many(&author_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let books = books
            .into_iter()
            .map(|book| {
                let author = authors.get(&book.author).cloned();
                BookWithAuthor::new(book, author)
            })
            .collect();

        Ok((books, total))
    }

    /// Get a book with its author expanded
    pub async fn get(&self, id: Uuid) -> AppResult<BookWithAuthor> {
        let book = self.repository.books.get_by_id(id).await?;
        let author = match self.repository.authors.get_by_id(book.author).await {
            Ok(author) => Some(author),
            Err(AppError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };
        Ok(BookWithAuthor::new(book, author))
    }

    /// Create a book. It shows up in its author's `books` from then on.
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;
        let book = self.repository.books.create(data).await?;
        tracing::info!("Created book id={} for author id={}", book.id, book.author);
        Ok(book)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        data.validate()?;
        self.repository.books.update(id, data).await
    }

    /// Delete a book. Deleting an unknown id succeeds.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.repository.books.delete(id).await? {
            tracing::info!("Deleted book id={}", id);
        } else {
            tracing::debug!("Delete of unknown book id={} ignored", id);
        }
        Ok(())
    }
}
