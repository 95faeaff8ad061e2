use arbor_core::error::CoreError;
use arbor_core::tree::FieldError;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `arbor_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request carried no usable `user_id` header.
    #[error("Missing caller identifier")]
    MissingCaller,

    /// The request body could not be buffered (too large, aborted).
    #[error("Unreadable request body: {0}")]
    Body(#[from] BytesRejection),

    /// A failure outside any handler (panic, broken middleware). The
    /// message is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
///
/// `message` is the canonical reason phrase of `status`. Only validation
/// failures carry `errors`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorBody {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown"),
            errors: None,
        }
    }
}

/// Build a bare error response for `status`.
pub fn error_response(status: StatusCode) -> Response {
    (status, axum::Json(ErrorBody::new(status))).into_response()
}

impl AppError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCaller => StatusCode::BAD_REQUEST,
            AppError::Core(CoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Core(CoreError::Forbidden(_)) => StatusCode::FORBIDDEN,
            AppError::Core(CoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Body(rejection) => rejection.status(),
            AppError::Database(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorBody::new(status);

        match self {
            AppError::Core(CoreError::Validation(errors)) => {
                tracing::debug!(count = errors.len(), "Rejected invalid input");
                body.errors = Some(errors);
            }
            AppError::Core(CoreError::NotFound { entity, id }) => {
                tracing::debug!(entity, %id, "Entity not found");
            }
            AppError::Core(CoreError::Forbidden(reason)) => {
                tracing::warn!(%reason, "Forbidden");
            }
            AppError::MissingCaller => {
                tracing::debug!("Request without caller identifier");
            }
            AppError::Body(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
            }
        }

        (status, axum::Json(body)).into_response()
    }
}
