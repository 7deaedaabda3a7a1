//! Data models for the library catalog

pub mod author;
pub mod book;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// Re-export commonly used types
pub use author::{Author, AuthorWithBooks, CreateAuthor, UpdateAuthor};
pub use book::{Book, BookWithAuthor, CreateBook, UpdateBook};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination and search parameters shared by both list endpoints
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number, 1-based (default: 1)
    pub page: Option<i64>,
    /// Records per page (default: 10, max: 100)
    pub limit: Option<i64>,
    /// Case-insensitive substring filter
    pub search: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// ILIKE pattern for the search term, `None` when no filter applies.
    /// LIKE metacharacters in the term match literally.
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref().map(str::trim).unwrap_or_default();
        if term.is_empty() {
            return None;
        }
        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Some(pattern)
    }
}

/// Parse an entity id taken from a request path
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Accepts `YYYY-MM-DD` as typed into a date input, or a full RFC 3339 timestamp.
fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| format!("invalid date `{}`, expected YYYY-MM-DD", raw))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_date(&raw).map_err(serde::de::Error::custom))
        .transpose()
}
