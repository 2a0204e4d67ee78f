//! Shared HTTP building blocks: response envelope, error mapping, extractors

pub mod error;
pub mod validated_json;
pub mod validated_path;
pub mod validators;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use error::{ApiError, ApiResult};
pub use validated_json::ValidatedJson;
pub use validated_path::ValidatedPath;

/// Response envelope shared by every endpoint.
///
/// Success: `{"status": 200, "data": [...]}`;
/// failure: `{"status": 404, "error": "..."}`.
/// The HTTP status always mirrors `status`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(status: StatusCode, data: Vec<T>) -> Self {
        Self {
            status: status.as_u16(),
            data: Some(data),
            error: None,
        }
    }

    pub fn ok(data: Vec<T>) -> Self {
        Self::success(StatusCode::OK, data)
    }

    pub fn created(data: Vec<T>) -> Self {
        Self::success(StatusCode::CREATED, data)
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            data: None,
            error: Some(message.into()),
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
