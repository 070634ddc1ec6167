//! bookshelf-server: HTTP access to a PostgreSQL table of books
//!
//! Three routes over one table: list every book, fetch one by ISBN, and
//! insert a new one. The pool is opened once by the caller and injected.

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use db::{create_pool, BookStore, DbError, MemoryBookStore, PgBookRepo};
pub use http::{build_router, run_server, ServerConfig, ServerError};
pub use models::{Book, Isbn};
pub use state::AppState;
