//! In-process book store
//!
//! Keeps insertion order and enforces ISBN uniqueness the way the table's
//! primary key would. Used to drive the router without PostgreSQL.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{BookStore, DbError};
use crate::models::{Book, Isbn};

#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `books`, in the given order.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn fetch_all(&self) -> Result<Vec<Book>, DbError> {
        Ok(self.books.read().await.clone())
    }

    async fn fetch_by_isbn(&self, isbn: &Isbn) -> Result<Book, DbError> {
        self.books
            .read()
            .await
            .iter()
            .find(|b| b.isbn == isbn.as_str())
            .cloned()
            .ok_or_else(|| DbError::NotFound {
                resource: "book",
                id: isbn.to_string(),
            })
    }

    async fn insert(&self, book: &Book) -> Result<u64, DbError> {
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.isbn == book.isbn) {
            return Err(DbError::Duplicate {
                resource: "book",
                id: book.isbn.clone(),
            });
        }
        books.push(book.clone());
        Ok(1)
    }
}
