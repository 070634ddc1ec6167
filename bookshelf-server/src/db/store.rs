//! Storage seam for book records

use async_trait::async_trait;

use crate::models::{Book, Isbn};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("duplicate key: {resource} '{id}' already exists")]
    Duplicate { resource: &'static str, id: String },
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Access to the book table.
///
/// Implementations surface "no such row" as [`DbError::NotFound`] and every
/// other failure as a storage error; nothing is retried.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Every book, in the order storage returns them.
    async fn fetch_all(&self) -> Result<Vec<Book>, DbError>;

    /// The book with the given ISBN.
    async fn fetch_by_isbn(&self, isbn: &Isbn) -> Result<Book, DbError>;

    /// Insert one book, returning the affected row count reported by storage.
    async fn insert(&self, book: &Book) -> Result<u64, DbError>;
}
