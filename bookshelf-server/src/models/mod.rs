//! Domain models with validation at construction
//!
//! Path input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod isbn;
pub mod book;

pub use validation::ValidationError;
pub use isbn::Isbn;
pub use book::Book;
