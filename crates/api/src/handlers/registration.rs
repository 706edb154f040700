//! Handlers for the `/formulario` JSON endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use regform_core::error::CoreError;
use regform_core::registration::{RegistrationForm, SchemaVariant};
use regform_core::validation::{validate, RawRecord, ValidationResult};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::processing::SubmissionChannel;
use crate::response::SubmissionResponse;
use crate::state::AppState;

/// POST /api/formulario
///
/// Validate a JSON registration record. Returns 400 with the full field-error
/// mapping on rejection, or 200 once the accepted record has been processed.
/// Undecodable bodies surface as 500 through [`AppError`].
pub async fn submit(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    let value: Value = serde_json::from_slice(&body)?;
    let raw = RawRecord::from_json(&value).map_err(CoreError::from)?;

    match validate(SchemaVariant::Registration.schema(), &raw) {
        ValidationResult::Rejected(errors) => {
            tracing::info!(
                fields = ?errors.fields().collect::<Vec<_>>(),
                "Registration rejected"
            );
            Ok((
                StatusCode::BAD_REQUEST,
                Json(SubmissionResponse::rejected(errors)),
            ))
        }
        ValidationResult::Accepted(record) => {
            let form: RegistrationForm = record
                .into_typed()
                .map_err(|e| AppError::InternalError(e.to_string()))?;
            state
                .processor
                .process(&form, SubmissionChannel::JsonEndpoint)
                .await;
            Ok((StatusCode::OK, Json(SubmissionResponse::processed())))
        }
    }
}

/// GET /api/formulario
///
/// The endpoint only accepts submissions.
pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Método GET não permitido" })),
    )
}
