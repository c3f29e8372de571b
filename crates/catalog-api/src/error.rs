//! Maps domain `AppError` to HTTP responses.
//!
//! Handlers return [`ApiError`], a thin wrapper that `?` converts into from
//! any [`AppError`].

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use catalog_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// HTTP status and error code for `kind`.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Serialization => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        ErrorKind::Storage => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        ErrorKind::Configuration | ErrorKind::Internal => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

/// An [`AppError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Result type returned by HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self(err) = self;
        let (status, error_code) = status_for(err.kind);

        // Server-side failures are logged in full and reported generically.
        let message = if status.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?err.source,
                "Request failed"
            );
            "An internal error occurred".to_string()
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(response: Response) -> ApiErrorResponse {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_storage_errors_are_sanitized_server_errors() {
        let response = ApiError::from(AppError::storage("connection refused")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body.error, "STORAGE_ERROR");
        assert_eq!(body.message, "An internal error occurred");
    }

    #[tokio::test]
    async fn test_client_errors_keep_their_message() {
        let response = ApiError::from(AppError::conflict("duplicate product")).into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_of(response).await;
        assert_eq!(body.error, "CONFLICT");
        assert_eq!(body.message, "duplicate product");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(status_for(ErrorKind::NotFound).0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_question_mark_converts_app_errors() {
        fn fails() -> ApiResult<()> {
            Err::<(), _>(AppError::validation("bad input"))?;
            Ok(())
        }

        let ApiError(err) = fails().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
