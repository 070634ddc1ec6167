//! Database layer - connection pool and book repository
//!
//! # Design Principles
//!
//! - One pool per process, injected into the repository
//! - Parameterized statements only, never string-built from input
//! - Rely on the primary key for uniqueness, no check-then-insert
//! - Column order lives in [`schema`], nowhere else

pub mod pool;
pub mod schema;
pub mod store;
pub mod books;
pub mod memory;

pub use pool::{create_pool, create_pool_with_options};
pub use store::{BookStore, DbError};
pub use books::PgBookRepo;
pub use memory::MemoryBookStore;
