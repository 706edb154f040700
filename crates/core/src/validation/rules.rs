//! Field rule, field spec and refinement types.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::record::NormalizedRecord;

/// Declared shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Boolean,
}

/// The predicate half of a [`FieldRule`], with its parameter.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Value must be present and non-empty. Boolean `false` counts as present.
    Required,
    /// At least `n` characters.
    MinLength(usize),
    /// At most `n` characters.
    MaxLength(usize),
    /// Expression is searched anywhere in the value; anchor it with `^...$`
    /// to constrain the whole value.
    Pattern(Regex),
    /// `local@domain.tld` shape.
    Email,
    /// At least one lowercase letter, one uppercase letter and one digit.
    PasswordStrength,
    /// Boolean value must be `true`.
    MustBeTrue,
    /// `YYYY-MM-DD` date at least `n` whole years before the evaluation date.
    MinAge(u32),
}

impl RuleKind {
    /// Stable snake_case name, used in logs and configuration errors.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::MinLength(_) => "min_length",
            RuleKind::MaxLength(_) => "max_length",
            RuleKind::Pattern(_) => "pattern",
            RuleKind::Email => "email",
            RuleKind::PasswordStrength => "password_strength",
            RuleKind::MustBeTrue => "must_be_true",
            RuleKind::MinAge(_) => "min_age",
        }
    }

    /// Whether this rule can be declared on a field of the given kind.
    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            RuleKind::Required => true,
            RuleKind::MustBeTrue => kind == FieldKind::Boolean,
            _ => kind == FieldKind::Text,
        }
    }
}

/// One atomic constraint on one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub kind: RuleKind,
    pub message: String,
}

impl FieldRule {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(RuleKind::Required, message)
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MinLength(min), message)
    }

    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MaxLength(max), message)
    }

    /// Unanchored expressions match any substring.
    pub fn pattern(regex: Regex, message: impl Into<String>) -> Self {
        Self::new(RuleKind::Pattern(regex), message)
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::new(RuleKind::Email, message)
    }

    pub fn password_strength(message: impl Into<String>) -> Self {
        Self::new(RuleKind::PasswordStrength, message)
    }

    pub fn must_be_true(message: impl Into<String>) -> Self {
        Self::new(RuleKind::MustBeTrue, message)
    }

    pub fn min_age(years: u32, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MinAge(years), message)
    }
}

/// Ordered rules bound to one field name.
///
/// Text values are trimmed before the rules see them unless the spec is
/// marked [`untrimmed`](FieldSpec::untrimmed) (passwords keep their
/// whitespace).
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub optional: bool,
    pub trim: bool,
    pub rules: Vec<FieldRule>,
}

impl FieldSpec {
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
            trim: true,
            rules: Vec::new(),
        }
    }

    /// Skip all rules when the value is absent or empty.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Keep leading/trailing whitespace in text values.
    pub fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }

    /// Append a rule. Rules run in the order they are added.
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Tightest lower bound across all `MinLength` rules.
    pub(crate) fn min_length(&self) -> Option<usize> {
        self.rules
            .iter()
            .filter_map(|r| match r.kind {
                RuleKind::MinLength(n) => Some(n),
                _ => None,
            })
            .max()
    }

    /// Tightest upper bound across all `MaxLength` rules.
    pub(crate) fn max_length(&self) -> Option<usize> {
        self.rules
            .iter()
            .filter_map(|r| match r.kind {
                RuleKind::MaxLength(n) => Some(n),
                _ => None,
            })
            .min()
    }
}

/// Predicate of a cross-field refinement.
#[derive(Debug, Clone)]
pub enum RefinementCheck {
    /// Both fields hold the same normalized value.
    FieldsEqual { left: String, right: String },
    /// Arbitrary predicate over the normalized record.
    Custom(fn(&NormalizedRecord) -> bool),
}

impl RefinementCheck {
    pub(crate) fn holds(&self, record: &NormalizedRecord) -> bool {
        match self {
            RefinementCheck::FieldsEqual { left, right } => record.get(left) == record.get(right),
            RefinementCheck::Custom(predicate) => predicate(record),
        }
    }

    /// Field names the check reads, for schema-construction checks.
    pub(crate) fn referenced_fields(&self) -> Vec<&str> {
        match self {
            RefinementCheck::FieldsEqual { left, right } => vec![left.as_str(), right.as_str()],
            RefinementCheck::Custom(_) => Vec::new(),
        }
    }
}

/// A whole-record constraint whose message attaches to `target`.
#[derive(Debug, Clone)]
pub struct Refinement {
    pub check: RefinementCheck,
    pub target: String,
    pub message: String,
}

impl Refinement {
    pub fn new(check: RefinementCheck, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check,
            target: target.into(),
            message: message.into(),
        }
    }

    /// `left == right`, reported on `right`.
    pub fn fields_equal(
        left: impl Into<String>,
        right: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let right = right.into();
        Self::new(
            RefinementCheck::FieldsEqual {
                left: left.into(),
                right: right.clone(),
            },
            right,
            message,
        )
    }
}
