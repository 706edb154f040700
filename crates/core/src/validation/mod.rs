//! Declarative record validation.
//!
//! Provides the rule and schema model, raw-record normalization, the
//! two-phase evaluator (fields, then cross-field refinements) and the
//! field-keyed error report.

pub mod evaluator;
pub mod record;
pub mod report;
pub mod rules;
pub mod schema;

pub use evaluator::{validate, validate_on};
pub use record::{FieldValue, NormalizedRecord, RawRecord, RawValue};
pub use report::{FieldErrors, ValidationResult};
pub use rules::{FieldKind, FieldRule, FieldSpec, Refinement, RefinementCheck, RuleKind};
pub use schema::{RecordSchema, SchemaError};
