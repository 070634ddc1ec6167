//! Column mapping for the `books` table
//!
//! Rows are decoded by position. The position of every field is recorded
//! once in [`BookColumn`], and the SELECT and INSERT column lists are
//! generated from it, so a schema reorder only touches this file.

use once_cell::sync::Lazy;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::models::Book;

/// Table holding book records
pub const TABLE: &str = "books";

/// Columns of [`TABLE`] in positional order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookColumn {
    Isbn,
    Title,
    Author,
    Price,
}

impl BookColumn {
    /// Every column, in table order.
    pub const ALL: [BookColumn; 4] = [Self::Isbn, Self::Title, Self::Author, Self::Price];

    /// Zero-based position in the result row.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Isbn => "isbn",
            Self::Title => "title",
            Self::Author => "author",
            Self::Price => "price",
        }
    }
}

fn column_list() -> String {
    BookColumn::ALL
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `SELECT <columns> FROM books`
pub static SELECT_ALL: Lazy<String> =
    Lazy::new(|| format!("SELECT {} FROM {}", column_list(), TABLE));

/// `SELECT <columns> FROM books WHERE isbn = $1`
pub static SELECT_BY_ISBN: Lazy<String> = Lazy::new(|| {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        column_list(),
        TABLE,
        BookColumn::Isbn.name()
    )
});

/// `INSERT INTO books (<columns>) VALUES ($1, ..)`, bound in [`BookColumn::ALL`] order
pub static INSERT_ONE: Lazy<String> = Lazy::new(|| {
    let placeholders = (1..=BookColumn::ALL.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        TABLE,
        column_list(),
        placeholders
    )
});

impl<'r> FromRow<'r, PgRow> for Book {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Book {
            isbn: row.try_get(BookColumn::Isbn.index())?,
            title: row.try_get(BookColumn::Title.index())?,
            author: row.try_get(BookColumn::Author.index())?,
            price: row.try_get(BookColumn::Price.index())?,
        })
    }
}
