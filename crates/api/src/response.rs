//! Response bodies shared by the submission handlers.

use indexmap::IndexMap;
use regform_core::registration::MSG_SUBMISSION_PROCESSED;
use regform_core::validation::FieldErrors;
use serde::Serialize;

/// Body of the JSON submission endpoint.
///
/// `{ "success": true, "message": ... }` on acceptance,
/// `{ "success": false, "errors": { field: [messages] } }` on rejection.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl SubmissionResponse {
    pub fn processed() -> Self {
        Self {
            success: true,
            message: Some(MSG_SUBMISSION_PROCESSED.to_string()),
            errors: None,
        }
    }

    pub fn rejected(errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: None,
            errors: Some(errors),
        }
    }
}

/// Result object of the server action, shaped for re-rendering the form in
/// place. `errors` is always present, empty on success.
#[derive(Debug, Serialize)]
pub struct ActionState {
    pub success: bool,
    pub message: String,
    pub errors: FieldErrors,
}

impl ActionState {
    pub fn processed() -> Self {
        Self {
            success: true,
            message: MSG_SUBMISSION_PROCESSED.to_string(),
            errors: FieldErrors::new(),
        }
    }

    pub fn rejected(errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: String::new(),
            errors,
        }
    }
}

/// Body of the dry-run endpoint: only the message a form renders next to
/// each control (the first one per field).
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, String>,
}

impl CheckResponse {
    pub fn from_errors(errors: Option<&FieldErrors>) -> Self {
        match errors {
            None => Self {
                valid: true,
                fields: IndexMap::new(),
            },
            Some(errors) => Self {
                valid: false,
                fields: errors.first_messages(),
            },
        }
    }
}
