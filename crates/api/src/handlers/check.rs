//! Dry-run validation for in-browser feedback.

use axum::body::Bytes;
use axum::extract::Path;
use axum::Json;
use regform_core::error::CoreError;
use regform_core::registration::SchemaVariant;
use regform_core::validation::{validate, RawRecord};
use serde_json::Value;

use crate::error::AppResult;
use crate::response::CheckResponse;

/// POST /api/formulario/check/{variant}
///
/// Validate a JSON record against the named schema variant without
/// processing it. Responds 200 either way; only the first message per field
/// is returned. Unknown variants are 404.
pub async fn check(Path(variant): Path<String>, body: Bytes) -> AppResult<Json<CheckResponse>> {
    let variant: SchemaVariant = variant.parse()?;
    let value: Value = serde_json::from_slice(&body)?;
    let raw = RawRecord::from_json(&value).map_err(CoreError::from)?;

    let result = validate(variant.schema(), &raw);
    tracing::debug!(%variant, valid = result.is_accepted(), "Dry-run validation");

    Ok(Json(CheckResponse::from_errors(result.errors())))
}
