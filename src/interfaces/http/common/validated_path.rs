//! Path extractor that reports rejections in the response envelope
//!
//! `ValidatedPath<T>` wraps `axum::extract::Path<T>`; an id that does not
//! parse yields `{"status": 400, "error": "..."}` instead of axum's plain-text
//! body.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;

use super::ApiResponse;

pub struct ValidatedPath<T>(pub T);

/// Wrapper around axum's [`PathRejection`] rendered as an envelope.
pub struct ValidatedPathRejection(PathRejection);

impl IntoResponse for ValidatedPathRejection {
    fn into_response(self) -> Response {
        ApiResponse::<()>::error(self.0.status(), self.0.body_text()).into_response()
    }
}

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ValidatedPathRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidatedPathRejection)?;
        Ok(ValidatedPath(value))
    }
}
