//! Server action for urlencoded form posts.
//!
//! Mirrors a progressive-enhancement form: the browser posts the raw form,
//! and the action answers with an [`ActionState`] the page re-renders from,
//! always with HTTP 200 unless the body itself cannot be decoded.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::{Form, Json};
use regform_core::registration::{RegistrationForm, SchemaVariant};
use regform_core::validation::{validate, RawRecord, ValidationResult};

use crate::error::{AppError, AppResult};
use crate::processing::SubmissionChannel;
use crate::response::ActionState;
use crate::state::AppState;

/// POST /actions/submit-form
///
/// Checkbox fields are normalized to booleans (`on` means checked, absent
/// means unchecked) before validation against the registration schema.
pub async fn submit_form(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> AppResult<Json<ActionState>> {
    let Form(pairs) = form?;
    let schema = SchemaVariant::Registration.schema();
    let raw = RawRecord::from_form_pairs(pairs, schema);

    match validate(schema, &raw) {
        ValidationResult::Rejected(errors) => {
            tracing::info!(
                fields = ?errors.fields().collect::<Vec<_>>(),
                "Server action rejected submission"
            );
            Ok(Json(ActionState::rejected(errors)))
        }
        ValidationResult::Accepted(record) => {
            let form: RegistrationForm = record
                .into_typed()
                .map_err(|e| AppError::InternalError(e.to_string()))?;
            state
                .processor
                .process(&form, SubmissionChannel::ServerAction)
                .await;
            Ok(Json(ActionState::processed()))
        }
    }
}
