//! Application state shared across handlers

use std::sync::Arc;

use crate::db::BookStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    books: Arc<dyn BookStore>,
}

impl AppState {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { books }),
        }
    }

    pub fn books(&self) -> &dyn BookStore {
        self.inner.books.as_ref()
    }
}
