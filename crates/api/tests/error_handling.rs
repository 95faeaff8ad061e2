//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is involved.

use arbor_api::error::AppError;
use arbor_core::error::CoreError;
use arbor_core::tree::FieldError;
use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::json;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn missing_caller_returns_400() {
    let (status, json) = error_to_response(AppError::MissingCaller).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"status": 400, "message": "Bad Request"}));
}

#[tokio::test]
async fn not_found_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Tree",
        id: "123".into(),
    });
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"status": 404, "message": "Not Found"}));
}

#[tokio::test]
async fn forbidden_hides_reason() {
    let err = AppError::Core(CoreError::Forbidden("Tree 1 is owned by 7".into()));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json, json!({"status": 403, "message": "Forbidden"}));
}

#[tokio::test]
async fn validation_returns_422_with_field_list() {
    let err = AppError::Core(CoreError::Validation(vec![
        FieldError::new("age", "must be an integer"),
        FieldError::new("name", "is required"),
    ]));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], 422);
    assert_eq!(json["message"], "Unprocessable Entity");
    assert_eq!(
        json["errors"],
        json!([
            {"field": "age", "message": "must be an integer"},
            {"field": "name", "message": "is required"}
        ])
    );
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({"status": 500, "message": "Internal Server Error"})
    );
}

#[tokio::test]
async fn database_error_returns_500() {
    let err = AppError::from(sqlx::Error::PoolTimedOut);
    assert_matches!(err, AppError::Database(_));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json.to_string().contains("PoolTimedOut"));
}

#[test]
fn core_errors_convert_into_app_errors() {
    let err: AppError = CoreError::Forbidden("not yours".into()).into();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}
