//! Mapping from domain errors to HTTP envelopes

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use super::ApiResponse;
use crate::shared::DomainError;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// Handler error wrapping a [`DomainError`]
#[derive(Debug)]
pub struct ApiError(pub DomainError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Access denial is reported as 401, matching authentication failures.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Validation(_) | DomainError::Conflict(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized(_) | DomainError::Forbidden(_) => StatusCode::UNAUTHORIZED,
            DomainError::Configuration(_) | DomainError::Storage(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            if self.0.is_transient() {
                warn!("Storage failure: {}", self.0);
            } else {
                error!("Request failed: {}", self.0);
            }
            INTERNAL_MESSAGE.to_string()
        } else {
            self.0.to_string()
        };

        ApiResponse::<()>::error(status, message).into_response()
    }
}
