//! Book repository over PostgreSQL
//!
//! - fetch_all: one SELECT, rows decoded through [`schema`](super::schema)
//! - fetch_by_isbn: point query, zero rows is NotFound
//! - insert: single INSERT, primary key violations reported as Duplicate
//!
//! `fetch_all`/`fetch_optional` drive the row stream to completion (or drop
//! it on error) before returning, so the connection goes back to the pool
//! on every path.

use async_trait::async_trait;
use sqlx::PgPool;

use super::schema::{BookColumn, INSERT_ONE, SELECT_ALL, SELECT_BY_ISBN};
use super::store::{BookStore, DbError};
use crate::models::{Book, Isbn};

/// Book repository
#[derive(Clone)]
pub struct PgBookRepo {
    pool: PgPool,
}

impl PgBookRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BookStore for PgBookRepo {
    async fn fetch_all(&self) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as::<_, Book>(SELECT_ALL.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    async fn fetch_by_isbn(&self, isbn: &Isbn) -> Result<Book, DbError> {
        sqlx::query_as::<_, Book>(SELECT_BY_ISBN.as_str())
            .bind(isbn.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "book",
                id: isbn.to_string(),
            })
    }

    async fn insert(&self, book: &Book) -> Result<u64, DbError> {
        let mut query = sqlx::query(INSERT_ONE.as_str());
        for column in BookColumn::ALL {
            query = match column {
                BookColumn::Isbn => query.bind(book.isbn.as_str()),
                BookColumn::Title => query.bind(book.title.as_str()),
                BookColumn::Author => query.bind(book.author.as_str()),
                BookColumn::Price => query.bind(book.price),
            };
        }

        let result = query.execute(&self.pool).await.map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => DbError::Duplicate {
                resource: "book",
                id: book.isbn.clone(),
            },
            other => DbError::Sqlx(other),
        })?;

        Ok(result.rows_affected())
    }
}
