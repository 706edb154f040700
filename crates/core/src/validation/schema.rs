//! Record schema and its checked construction.

use indexmap::IndexMap;

use super::rules::{FieldKind, FieldSpec, Refinement};

/// Programmer error in a schema declaration.
///
/// Never reported to end users; a schema that fails to build cannot produce
/// a correct validation result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),

    #[error("field `{field}` has min length {min} greater than max length {max}")]
    InvertedLengthBounds {
        field: String,
        min: usize,
        max: usize,
    },

    #[error("rule `{rule}` cannot be declared on {kind:?} field `{field}`")]
    RuleKindMismatch {
        field: String,
        rule: &'static str,
        kind: FieldKind,
    },

    #[error("refinement references unknown field `{0}`")]
    UnknownRefinementField(String),
}

/// Ordered field specs plus whole-record refinements.
///
/// Immutable once built; share one instance across all callers.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    fields: IndexMap<String, FieldSpec>,
    refinements: Vec<Refinement>,
}

impl RecordSchema {
    pub fn builder() -> RecordSchemaBuilder {
        RecordSchemaBuilder::default()
    }

    /// Field specs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }
}

/// Collects fields and refinements; all consistency checks run in
/// [`build`](RecordSchemaBuilder::build).
#[derive(Debug, Default)]
pub struct RecordSchemaBuilder {
    fields: Vec<FieldSpec>,
    refinements: Vec<Refinement>,
}

impl RecordSchemaBuilder {
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    pub fn build(self) -> Result<RecordSchema, SchemaError> {
        let mut fields = IndexMap::with_capacity(self.fields.len());
        for spec in self.fields {
            check_field(&spec)?;
            if fields.contains_key(&spec.name) {
                return Err(SchemaError::DuplicateField(spec.name));
            }
            fields.insert(spec.name.clone(), spec);
        }

        for refinement in &self.refinements {
            let referenced = refinement
                .check
                .referenced_fields()
                .into_iter()
                .chain(std::iter::once(refinement.target.as_str()));
            for name in referenced {
                if !fields.contains_key(name) {
                    return Err(SchemaError::UnknownRefinementField(name.to_string()));
                }
            }
        }

        Ok(RecordSchema {
            fields,
            refinements: self.refinements,
        })
    }
}

fn check_field(spec: &FieldSpec) -> Result<(), SchemaError> {
    if let Some(rule) = spec.rules.iter().find(|r| !r.kind.applies_to(spec.kind)) {
        return Err(SchemaError::RuleKindMismatch {
            field: spec.name.clone(),
            rule: rule.kind.name(),
            kind: spec.kind,
        });
    }
    if let (Some(min), Some(max)) = (spec.min_length(), spec.max_length()) {
        if min > max {
            return Err(SchemaError::InvertedLengthBounds {
                field: spec.name.clone(),
                min,
                max,
            });
        }
    }
    Ok(())
}
