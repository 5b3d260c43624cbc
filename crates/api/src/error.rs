use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tasklist_core::error::CoreError;

use crate::views;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`sqlx::Error`] for storage
/// failures. Form handlers turn it into a redirect with an error notice;
/// page handlers render it through [`IntoResponse`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tasklist_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Map this error to an HTTP status and a message safe to show users.
    ///
    /// Database and internal failures are logged here and replaced by a
    /// generic message.
    pub fn classify(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_INTERNAL_MESSAGE.to_string(),
                )
            }
            AppError::Database(sqlx::Error::RowNotFound) => {
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_DB_MESSAGE.to_string(),
                )
            }
        }
    }
}

/// Shown in place of any storage failure.
pub const GENERIC_DB_MESSAGE: &str = "Could not reach the database. Please try again later.";

/// Shown in place of any unexpected internal failure.
pub const GENERIC_INTERNAL_MESSAGE: &str = "An internal error occurred.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.classify();
        (status, Html(views::error_page(status, &message))).into_response()
    }
}
