//! Repository layer for database operations

pub mod authors;
pub mod books;

use std::sync::Arc;

use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

pub use authors::{AuthorRepository, PgAuthorRepository};
pub use books::{BookRepository, PgBookRepository};

/// Schema migrations, embedded at compile time
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Main repository struct holding one store per collection
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorRepository>,
    pub books: Arc<dyn BookRepository>,
}

impl Repository {
    /// Create a new repository backed by the given database pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            authors: Arc::new(PgAuthorRepository::new(pool.clone())),
            books: Arc::new(PgBookRepository::new(pool)),
        }
    }

    /// Assemble a repository from arbitrary store implementations
    pub fn from_parts(authors: Arc<dyn AuthorRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { authors, books }
    }
}

/// Open a connection pool to the configured database
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect(&config.url)
        .await
}
