//! Validation outcome and the field-keyed error report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::record::NormalizedRecord;

/// Field name to ordered, non-empty list of messages.
///
/// Keys appear in the order errors were recorded, which the evaluator keeps
/// aligned with schema field order followed by refinement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` under `field`, creating the entry if needed.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// The message a form shows next to the control for `field`.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// First message per field, in report order.
    pub fn first_messages(&self) -> IndexMap<String, String> {
        self.0
            .iter()
            .filter_map(|(field, messages)| Some((field.clone(), messages.first()?.clone())))
            .collect()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of one `validate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted(NormalizedRecord),
    Rejected(FieldErrors),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            ValidationResult::Accepted(_) => None,
            ValidationResult::Rejected(errors) => Some(errors),
        }
    }

    pub fn into_result(self) -> Result<NormalizedRecord, FieldErrors> {
        match self {
            ValidationResult::Accepted(record) => Ok(record),
            ValidationResult::Rejected(errors) => Err(errors),
        }
    }
}
