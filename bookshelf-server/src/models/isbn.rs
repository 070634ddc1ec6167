//! ISBN path parameter
//!
//! The service only requires the identifier to be present. Format and
//! uniqueness belong to the storage engine.

use std::fmt;

use super::ValidationError;

/// Non-empty book identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isbn(String);

impl Isbn {
    /// Create an ISBN, rejecting the empty string.
    ///
    /// # Example
    /// ```
    /// use bookshelf_server::models::Isbn;
    ///
    /// assert!(Isbn::new("978-0131103627").is_ok());
    /// assert!(Isbn::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "ISBN" });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the ISBN as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
