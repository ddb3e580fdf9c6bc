//! # API Error Responses
//!
//! Every failing request answers with the same body shape:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP 4xx / 5xx                                                         │
//! │  { "error": "<message shown to the operator>", "code": "<MACHINE>" }    │
//! │                                                                         │
//! │  ValidationError        → 400 VALIDATION_ERROR  (message verbatim)      │
//! │  DbError::NotFound      → 404 NOT_FOUND                                 │
//! │  DbError::Unique        → 400 DUPLICATE                                 │
//! │  DbError::Check / FK    → 400 CONSTRAINT_VIOLATION                      │
//! │  bad JSON/query/form    → 4xx BAD_REQUEST                               │
//! │  anything else          → 500 INTERNAL_ERROR    (cause logged only)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use storefront_core::{ErrorBody, ValidationError};
use storefront_db::DbError;

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An error response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{status} {code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// Logs `cause` and hides it behind a generic message.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "Internal error while handling request");
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: Some(self.code.to_string()),
        };
        (self.status, Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        if !err.is_client_error() {
            return ApiError::internal(err);
        }

        match err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::UniqueViolation { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, "DUPLICATE", err.to_string())
            }
            _ => ApiError::new(StatusCode::BAD_REQUEST, "CONSTRAINT_VIOLATION", err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), "BAD_REQUEST", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(rejection.status(), "BAD_REQUEST", rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::new(rejection.status(), "BAD_REQUEST", rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::new(err.status(), "BAD_REQUEST", err.body_text())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_errors_map_to_status() {
        let err: ApiError = DbError::not_found("Product", "P9").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Product not found: P9");

        let err: ApiError = DbError::not_found("Category", "c9").into();
        assert_eq!(err.message, "Category not found: c9");

        let err: ApiError = DbError::duplicate("email", "a@b.co").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "DUPLICATE");

        let err: ApiError = DbError::PoolExhausted.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err: ApiError = ValidationError::required("name").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "name is required");
    }
}
