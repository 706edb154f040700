//! Raw input records, their normalization, and the normalized output record.
//!
//! Every submission path funnels through here: JSON bodies go through
//! [`RawRecord::from_json`], urlencoded form posts through
//! [`RawRecord::from_form_pairs`]. Empty strings become absent and checkbox
//! values become booleans in one place, so the evaluator only ever sees one
//! canonical input shape.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rules::FieldKind;
use super::schema::RecordSchema;

/// Form values treated as a checked checkbox.
const CHECKED_VALUES: &[&str] = &["on", "true", "1"];

/// An untyped input value prior to validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Not provided (missing key, `null`, or empty string).
    Absent,
    Text(String),
    Bool(bool),
    /// Arrays and objects. Fails whichever rule the field runs first.
    Unsupported(Value),
}

static ABSENT: RawValue = RawValue::Absent;

/// Transport-level decoding failure, distinct from field violations.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Field name to raw value, as gathered from a form or request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    values: HashMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `field`, or [`RawValue::Absent`] when the key is missing.
    pub fn get(&self, field: &str) -> &RawValue {
        self.values.get(field).unwrap_or(&ABSENT)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: RawValue) {
        self.values.insert(field.into(), value);
    }

    /// Builder-style [`insert`](Self::insert) for a text value.
    pub fn with_text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, RawValue::text(value));
        self
    }

    /// Builder-style [`insert`](Self::insert) for a boolean value.
    pub fn with_bool(mut self, field: impl Into<String>, value: bool) -> Self {
        self.insert(field, RawValue::Bool(value));
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Normalize a JSON request body.
    ///
    /// `null` and `""` become absent, numbers become their text rendering.
    /// Anything other than an object is a decoding failure.
    pub fn from_json(body: &Value) -> Result<Self, NormalizeError> {
        let object = body.as_object().ok_or(NormalizeError::NotAnObject {
            found: json_type_name(body),
        })?;

        let values = object
            .iter()
            .map(|(key, value)| (key.clone(), RawValue::from_json(value)))
            .collect();
        Ok(Self { values })
    }

    /// Normalize urlencoded form pairs against `schema`.
    ///
    /// Fields the schema declares as [`FieldKind::Boolean`] are checkboxes:
    /// an unchecked box is not submitted at all, so a missing key means
    /// `false`. Repeated keys keep the last value.
    pub fn from_form_pairs<I, K, V>(pairs: I, schema: &RecordSchema) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut submitted: HashMap<String, String> = HashMap::new();
        for (key, value) in pairs {
            submitted.insert(key.into(), value.into());
        }

        let mut record = Self::new();
        for spec in schema.fields() {
            if spec.kind == FieldKind::Boolean {
                let checked = submitted
                    .remove(&spec.name)
                    .is_some_and(|v| CHECKED_VALUES.contains(&v.trim()));
                record.insert(spec.name.clone(), RawValue::Bool(checked));
            }
        }
        for (key, value) in submitted {
            record.insert(key, RawValue::text(value));
        }
        record
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, RawValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl RawValue {
    /// Text value; the empty string is absent.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            RawValue::Absent
        } else {
            RawValue::Text(value)
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Absent,
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Number(n) => RawValue::Text(n.to_string()),
            Value::String(s) => RawValue::text(s.as_str()),
            other => RawValue::Unsupported(other.clone()),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A validated, typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

/// The record returned on acceptance, in schema field order.
///
/// Text is trimmed (unless the field keeps whitespace), booleans are typed,
/// and optional fields that were left empty are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    values: IndexMap<String, FieldValue>,
}

impl NormalizedRecord {
    pub(crate) fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn flag(&self, field: &str) -> Option<bool> {
        match self.values.get(field) {
            Some(FieldValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| {
                    let v = match v {
                        FieldValue::Text(s) => Value::String(s.clone()),
                        FieldValue::Bool(b) => Value::Bool(*b),
                    };
                    (k.clone(), v)
                })
                .collect(),
        )
    }

    /// Deserialize into a typed form struct.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }
}
