//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use http_body_util::BodyExt;
use regform_api::error::AppError;
use regform_core::error::CoreError;
use regform_core::validation::{RawRecord, SchemaError};

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: unknown schema variant maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_variant_returns_404() {
    let err = AppError::Core(CoreError::UnknownVariant("newsletter".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Unknown schema variant: newsletter");
    assert_eq!(json["success"], false);
}

// ---------------------------------------------------------------------------
// Test: decoding failures map to 500 with the generic message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_body_returns_500_and_hides_details() {
    let err = AppError::MalformedBody("expected value at line 1 column 2".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "MALFORMED_BODY");
    assert_eq!(json["message"], "Erro interno do servidor");
}

#[tokio::test]
async fn non_object_record_returns_500() {
    let normalize_err = RawRecord::from_json(&serde_json::json!(42)).unwrap_err();
    let err = AppError::Core(CoreError::from(normalize_err));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "MALFORMED_BODY");
}

// ---------------------------------------------------------------------------
// Test: configuration defects and internal errors are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn schema_defect_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Schema(SchemaError::UnknownRefinementField(
        "confirmPassword".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["message"].as_str().unwrap().contains("confirmPassword"));
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret processing detail".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "Erro interno do servidor");
}

// ---------------------------------------------------------------------------
// Test: every core failure has a dedicated status and code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn each_core_error_variant_has_a_distinct_mapping() {
    let cases = [
        CoreError::UnknownVariant("newsletter".into()),
        CoreError::from(RawRecord::from_json(&serde_json::json!([])).unwrap_err()),
        CoreError::from(SchemaError::DuplicateField("name".into())),
    ];

    for core in cases {
        let expected = match &core {
            CoreError::UnknownVariant(_) => (axum::http::StatusCode::NOT_FOUND, "NOT_FOUND"),
            CoreError::Normalize(_) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "MALFORMED_BODY"),
            CoreError::Schema(_) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let (status, json) = error_to_response(AppError::Core(core)).await;

        assert_eq!((status, json["code"].as_str().unwrap()), expected);
    }
}
