//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{Book, Isbn, ValidationError};

/// Extract and validate an ISBN from path.
///
/// A route without the parameter (`/books/`) is treated as an empty ISBN.
pub struct ValidIsbn(pub Isbn);

impl<S> FromRequestParts<S> for ValidIsbn
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(isbn): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "ISBN" }))?;

        Ok(Self(Isbn::new(&isbn)?))
    }
}

/// Decode a [`Book`] from a JSON request body.
///
/// The body is parsed regardless of `Content-Type`. Any failure, including
/// a body that cannot be read, is reported as [`ApiError::MalformedBody`].
pub struct BookJson(pub Book);

impl<S> FromRequest<S> for BookJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "failed to read request body");
            ApiError::MalformedBody
        })?;

        let book = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "rejected book body");
            ApiError::MalformedBody
        })?;

        Ok(Self(book))
    }
}
