//! Synthetic catalog data and the maintenance operations behind the
//! `drop` and `populate` binaries.

use chrono::NaiveDate;
use rand::{seq::SliceRandom, Rng};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::SeedConfig,
    error::{AppError, AppResult},
    models::{CreateAuthor, CreateBook},
    repository::Repository,
};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Beatriz", "Carlos", "Chiamaka", "Dmitri", "Elena", "Farah", "Gustavo",
    "Hana", "Ingrid", "Jonas", "Kenji", "Leila", "Mateus", "Nadia", "Olga", "Pedro", "Rosa",
    "Sven", "Tomasz", "Uma", "Valeria", "Yusuf",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Brandt", "Costa", "Dubois", "Eriksen", "Ferreira", "Garcia", "Haddad",
    "Ivanova", "Jensen", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Pereira",
    "Quintana", "Rossi", "Santos", "Tanaka", "Urquhart", "Varga", "Weber", "Zhou",
];

const COUNTRIES: &[&str] = &[
    "Angola", "Argentina", "Brazil", "Canada", "Chile", "Egypt", "France", "Germany", "India",
    "Ireland", "Italy", "Japan", "Kenya", "Mexico", "Nigeria", "Norway", "Poland", "Portugal",
    "South Korea", "Spain", "Sweden", "Turkey", "United Kingdom", "Vietnam",
];

const GENRES: &[&str] = &[
    "Fantasy", "Science Fiction", "Mystery", "Romance", "Horror", "Poetry", "Biography",
    "History", "Essay", "Thriller", "Drama", "Nonfiction",
];

const WORDS: &[&str] = &[
    "amber", "bridge", "candle", "distant", "echo", "forest", "garden", "harbor", "iron",
    "journey", "kingdom", "lantern", "mirror", "night", "ocean", "paper", "quiet", "river",
    "silent", "thread", "under", "velvet", "winter", "yellow",
];

/// Counts of what `populate` inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub authors: usize,
    pub books: usize,
}

fn pick<'a, R: Rng>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

/// Author with a random name, a birth date between 1950 and 2000 and a random country
pub fn fake_author<R: Rng>(rng: &mut R) -> AppResult<CreateAuthor> {
    let year = rng.gen_range(1950..=2000);
    let birthdate = NaiveDate::from_yo_opt(year, rng.gen_range(1..=365))
        .ok_or_else(|| AppError::Internal(format!("no such day in {}", year)))?;

    Ok(CreateAuthor {
        name: format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES)),
        birthdate,
        nationality: pick(rng, COUNTRIES).to_string(),
    })
}

/// Book by `author` with a 2-5 word title, published 1950-2025, and a random UUID as ISBN
pub fn fake_book<R: Rng>(rng: &mut R, author: Uuid) -> CreateBook {
    let word_count = rng.gen_range(2..=5);
    let title = (0..word_count)
        .map(|_| pick(rng, WORDS))
        .collect::<Vec<_>>()
        .join(" ");

    CreateBook {
        title,
        author,
        published_year: rng.gen_range(1950..=2025),
        genre: pick(rng, GENRES).to_string(),
        isbn: Uuid::new_v4().to_string(),
    }
}

/// Clear both collections, then insert synthetic authors and books.
/// Each book goes to an author drawn uniformly at random.
pub async fn populate<R: Rng>(
    repository: &Repository,
    config: &SeedConfig,
    rng: &mut R,
) -> AppResult<SeedSummary> {
    let books_removed = repository.books.delete_all().await?;
    let authors_removed = repository.authors.delete_all().await?;
    tracing::info!(
        "Cleared {} author(s) and {} book(s)",
        authors_removed,
        books_removed
    );

    let mut author_ids = Vec::with_capacity(config.authors);
    for _ in 0..config.authors {
        let author = repository.authors.create(&fake_author(rng)?).await?;
        author_ids.push(author.id);
    }

    let mut books = 0;
    if author_ids.is_empty() {
        tracing::warn!("No authors to assign books to, skipping books");
    } else {
        for _ in 0..config.books {
            let author = author_ids[rng.gen_range(0..author_ids.len())];
            repository.books.create(&fake_book(rng, author)).await?;
            books += 1;
        }
    }

    Ok(SeedSummary {
        authors: author_ids.len(),
        books,
    })
}

/// Drop every table the application owns, including the migration ledger,
/// so the next start recreates the schema from scratch.
pub async fn drop_all(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("DROP TABLE IF EXISTS books, authors, _sqlx_migrations CASCADE")
        .execute(pool)
        .await?;
    Ok(())
}
