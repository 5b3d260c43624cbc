//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` / `classify` directly and need no server.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use tasklist_api::error::{AppError, GENERIC_DB_MESSAGE, GENERIC_INTERNAL_MESSAGE};
use tasklist_core::error::CoreError;

async fn error_to_response(err: AppError) -> (StatusCode, String) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Task",
        id: 42,
    });

    let (status, body) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Task with id 42 not found"));
}

#[tokio::test]
async fn validation_error_returns_400_with_message() {
    let err = AppError::Core(CoreError::Validation("Task text cannot be empty".into()));

    let (status, body) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Task text cannot be empty"));
}

#[tokio::test]
async fn database_error_returns_500_and_sanitizes_message() {
    let err = AppError::Database(sqlx::Error::Protocol(
        "password authentication failed for user secret_user".into(),
    ));

    let (status, body) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        !body.contains("secret_user"),
        "Database error page must not leak driver details"
    );
    assert!(body.contains(GENERIC_DB_MESSAGE));
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, _) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn core_errors_convert_with_question_mark() {
    fn fails() -> Result<(), AppError> {
        Err(CoreError::Validation("bad".into()))?;
        Ok(())
    }
    assert_matches!(fails(), Err(AppError::Core(CoreError::Validation(msg))) if msg == "bad");
}

#[test]
fn classify_escapes_nothing_itself() {
    // Escaping happens in the view layer; classify returns raw text.
    let err = AppError::Core(CoreError::Validation("<b>".into()));
    let (_, message) = err.classify();
    assert_eq!(message, "<b>");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Internal("secret pool credentials".into()));

    let (status, body) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        !body.contains("secret"),
        "Internal error page must not leak details"
    );
    assert!(body.contains(GENERIC_INTERNAL_MESSAGE));
}

#[test]
fn only_storage_and_internal_failures_classify_as_server_errors() {
    // Form handlers log client-side failures themselves and rely on
    // `classify` having logged server-side ones.
    let server = [
        AppError::Database(sqlx::Error::PoolClosed),
        AppError::Core(CoreError::Internal("boom".into())),
    ];
    for err in &server {
        assert!(err.classify().0.is_server_error(), "{err:?}");
    }

    let client = [
        AppError::Core(CoreError::Validation("empty".into())),
        AppError::Core(CoreError::NotFound { entity: "Task", id: 1 }),
        AppError::Database(sqlx::Error::RowNotFound),
    ];
    for err in &client {
        assert!(!err.classify().0.is_server_error(), "{err:?}");
    }
}
