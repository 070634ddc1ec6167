//! Book endpoints
//!
//! Responses are plain text, one `isbn title author price` line per book.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{BookJson, ValidIsbn};
use crate::models::Isbn;
use crate::state::AppState;

/// ISBN that shares its path with the create route
const CREATE_SEGMENT: &str = "create";

/// GET /books - list every book in storage order
async fn list_books(State(state): State<AppState>) -> Result<String, ApiError> {
    let books = state
        .books()
        .fetch_all()
        .await
        .map_err(|e| ApiError::storage("Error when getting all books from db", e))?;

    Ok(books.iter().map(|b| format!("{b}\n")).collect())
}

async fn book_line(state: &AppState, isbn: &Isbn) -> Result<String, ApiError> {
    let book = state
        .books()
        .fetch_by_isbn(isbn)
        .await
        .map_err(|e| ApiError::lookup("error when scanning book struct", e))?;

    Ok(format!("{}\n", book))
}

/// GET /books/{isbn} - get a single book
async fn get_book(
    State(state): State<AppState>,
    ValidIsbn(isbn): ValidIsbn,
) -> Result<String, ApiError> {
    book_line(&state, &isbn).await
}

/// GET /books/create - the book whose ISBN is `create`
async fn get_create_book(State(state): State<AppState>) -> Result<String, ApiError> {
    book_line(&state, &Isbn::new(CREATE_SEGMENT)?).await
}

/// POST /books/create - insert one book
async fn create_book(
    State(state): State<AppState>,
    BookJson(book): BookJson,
) -> Result<(StatusCode, String), ApiError> {
    let affected = state
        .books()
        .insert(&book)
        .await
        .map_err(|e| ApiError::storage(e.to_string(), e))?;

    tracing::info!(isbn = %book.isbn, affected, "book created");

    Ok((
        StatusCode::CREATED,
        format!(
            "Book {} created successfully ({} row affected)\n",
            book.isbn, affected
        ),
    ))
}

/// Book routes
///
/// `/books/` is routed to the get handler so a missing ISBN is answered
/// with 400 rather than falling through to 404. `/books/create` answers GET
/// too, otherwise the static route would hide the book with that ISBN.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books))
        .route("/books/", get(get_book))
        .route("/books/create", post(create_book).get(get_create_book))
        .route("/books/{isbn}", get(get_book))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::db::{BookStore, DbError, MemoryBookStore};
    use crate::http::build_router;
    use crate::models::{Book, Isbn};
    use crate::state::AppState;

    /// Counts calls before delegating to an in-memory store
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryBookStore,
        calls: AtomicUsize,
    }

    impl CountingStore {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BookStore for CountingStore {
        async fn fetch_all(&self) -> Result<Vec<Book>, DbError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_all().await
        }

        async fn fetch_by_isbn(&self, isbn: &Isbn) -> Result<Book, DbError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_by_isbn(isbn).await
        }

        async fn insert(&self, book: &Book) -> Result<u64, DbError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.insert(book).await
        }
    }

    /// Every call fails as if the pool were gone
    struct BrokenStore;

    #[async_trait]
    impl BookStore for BrokenStore {
        async fn fetch_all(&self) -> Result<Vec<Book>, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        }

        async fn fetch_by_isbn(&self, _isbn: &Isbn) -> Result<Book, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        }

        async fn insert(&self, _book: &Book) -> Result<u64, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        }
    }

    /// Reports an unexpected affected-row count
    struct ZeroRowStore;

    #[async_trait]
    impl BookStore for ZeroRowStore {
        async fn fetch_all(&self) -> Result<Vec<Book>, DbError> {
            Ok(Vec::new())
        }

        async fn fetch_by_isbn(&self, isbn: &Isbn) -> Result<Book, DbError> {
            Err(DbError::NotFound {
                resource: "book",
                id: isbn.to_string(),
            })
        }

        async fn insert(&self, _book: &Book) -> Result<u64, DbError> {
            Ok(0)
        }
    }

    fn app(store: Arc<dyn BookStore>) -> axum::Router {
        build_router(AppState::new(store))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn create(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/books/create")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    const SAMPLE: &str =
        r#"{"isbn":"abc123","author":"A. Writer","title":"Sample","price":9.99}"#;

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let app = app(Arc::new(MemoryBookStore::new()));

        let (status, body) = send(&app, create(SAMPLE)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "Book abc123 created successfully (1 row affected)\n");

        let (status, body) = send(&app, get("/books/abc123")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "abc123 Sample A. Writer 9.990000\n");
    }

    #[tokio::test]
    async fn isbn_named_create_round_trips() {
        let app = app(Arc::new(MemoryBookStore::new()));

        let (status, body) = send(
            &app,
            create(r#"{"isbn":"create","title":"Routes","author":"R. Path","price":3.5}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "Book create created successfully (1 row affected)\n");

        let (status, body) = send(&app, get("/books/create")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "create Routes R. Path 3.500000\n");
    }

    #[tokio::test]
    async fn isbn_named_create_is_404_until_inserted() {
        let app = app(Arc::new(MemoryBookStore::new()));
        let (status, body) = send(&app, get("/books/create")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn create_accepts_body_without_content_type() {
        let app = app(Arc::new(MemoryBookStore::new()));
        let req = Request::builder()
            .method("POST")
            .uri("/books/create")
            .body(Body::from(SAMPLE))
            .unwrap();

        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn list_empty_store_is_empty_body() {
        let app = app(Arc::new(MemoryBookStore::new()));
        let (status, body) = send(&app, get("/books")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn list_writes_one_line_per_book_in_storage_order() {
        let store = MemoryBookStore::with_books(vec![
            Book {
                isbn: "b".into(),
                title: "Second".into(),
                author: "Y".into(),
                price: 0.0,
            },
            Book {
                isbn: "a".into(),
                title: "First".into(),
                author: "X".into(),
                price: 12.5,
            },
        ]);
        let app = app(Arc::new(store));

        let (status, body) = send(&app, get("/books")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "b Second Y 0.000000\na First X 12.500000\n");
    }

    #[tokio::test]
    async fn unknown_isbn_is_404() {
        let app = app(Arc::new(MemoryBookStore::new()));
        let (status, body) = send(&app, get("/books/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn empty_isbn_is_400_without_query() {
        let store = Arc::new(CountingStore::default());
        let app = app(store.clone());

        let (status, body) = send(&app, get("/books/")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "ISBN cannot be empty\n");
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn malformed_bodies_never_reach_storage() {
        let store = Arc::new(CountingStore::default());
        let app = app(store.clone());

        let bodies = [
            r#"{"isbn":"x","title":"t","author":"a","price":"9.99"}"#,
            r#"{"isbn":"x","title":"t","price":1}"#,
            r#"{"isbn":"x""#,
            "",
            "[]",
        ];
        for body in bodies {
            let (status, text) = send(&app, create(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(text, "body malformed\n");
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn storage_failures_are_500() {
        let app = app(Arc::new(BrokenStore));

        let (status, body) = send(&app, get("/books")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error when getting all books from db\n");

        let (status, body) = send(&app, get("/books/abc")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "error when scanning book struct\n");

        let (status, body) = send(&app, create(SAMPLE)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("database error:"), "got {body}");
    }

    #[tokio::test]
    async fn duplicate_create_is_500_with_error_text() {
        let app = app(Arc::new(MemoryBookStore::new()));
        send(&app, create(SAMPLE)).await;

        let (status, body) = send(&app, create(SAMPLE)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("abc123"), "got {body}");
    }

    #[tokio::test]
    async fn unexpected_row_count_is_reported_as_is() {
        let app = app(Arc::new(ZeroRowStore));
        let (status, body) = send(&app, create(SAMPLE)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "Book abc123 created successfully (0 row affected)\n");
    }

    #[tokio::test]
    async fn concurrent_creates_are_all_listed() {
        let app = app(Arc::new(MemoryBookStore::new()));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let app = app.clone();
                tokio::spawn(async move {
                    let body = format!(
                        r#"{{"isbn":"isbn-{i}","title":"T{i}","author":"A","price":{i}}}"#
                    );
                    send(&app, create(&body)).await.0
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
        }

        let (_, body) = send(&app, get("/books")).await;
        let listed: BTreeSet<String> = body
            .lines()
            .map(|line| line.split(' ').next().unwrap().to_owned())
            .collect();
        let expected: BTreeSet<String> = (0..32).map(|i| format!("isbn-{i}")).collect();
        assert_eq!(listed, expected);
        assert_eq!(body.lines().count(), 32);
    }
}
