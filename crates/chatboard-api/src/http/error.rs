//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use chatboard_types::error::{CommentError, NewsError, ValidationError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Comment-related errors.
    Comment(CommentError),
    /// News cache errors.
    News(NewsError),
}

impl From<CommentError> for AppError {
    fn from(e: CommentError) -> Self {
        AppError::Comment(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Comment(CommentError::Validation(e))
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Comment(CommentError::Validation(ValidationError::Malformed(
            e.body_text(),
        )))
    }
}

impl From<NewsError> for AppError {
    fn from(e: NewsError) -> Self {
        AppError::News(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Comment(CommentError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Comment(CommentError::Storage(e)) => {
                tracing::error!(error = %e, "Comment storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Failed to access comment storage".to_string(),
                )
            }
            AppError::News(NewsError::Unavailable) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NEWS_UNAVAILABLE",
                NewsError::Unavailable.to_string(),
            ),
            AppError::News(e) => (StatusCode::BAD_GATEWAY, "NEWS_ERROR", e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = ApiResponse::error(code, &message, String::new());
        (status, Json(body)).into_response()
    }
}
