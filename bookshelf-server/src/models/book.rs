//! Book record

use std::fmt;

use serde::{Deserialize, Serialize};

/// A row of the `books` table.
///
/// Also the JSON body accepted by `POST /books/create`: every field is
/// required, unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub price: f32,
}

/// Plain-text line used by the list and get endpoints: `isbn title author price`
/// with the price printed to six decimal places.
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {:.6}", self.isbn, self.title, self.author, self.price)
    }
}
