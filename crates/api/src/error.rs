use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use regform_core::error::CoreError;
use serde_json::json;

/// Generic message for failures that are not field-level rejections.
pub const MSG_INTERNAL_ERROR: &str = "Erro interno do servidor";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Field-level validation failures are never represented here; they travel
/// inside successful handler results.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `regform_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be decoded (bad JSON, wrong form encoding).
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedBody(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::UnknownVariant(variant) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Unknown schema variant: {variant}"),
                ),
                CoreError::Normalize(err) => {
                    tracing::warn!(error = %err, "Rejected undecodable submission");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "MALFORMED_BODY",
                        MSG_INTERNAL_ERROR.to_string(),
                    )
                }
                CoreError::Schema(err) => {
                    tracing::error!(error = %err, "Schema configuration defect");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        MSG_INTERNAL_ERROR.to_string(),
                    )
                }
            },

            AppError::MalformedBody(msg) => {
                tracing::warn!(error = %msg, "Rejected undecodable submission");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MALFORMED_BODY",
                    MSG_INTERNAL_ERROR.to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    MSG_INTERNAL_ERROR.to_string(),
                )
            }
        };

        let body = json!({
            "success": false,
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
