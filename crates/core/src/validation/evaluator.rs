//! Schema evaluator — pure logic, no I/O.
//!
//! Two phases: every field runs its rules (stopping at that field's first
//! failure), then, only if no field failed, the cross-field refinements run
//! against the normalized record.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

use super::record::{FieldValue, NormalizedRecord, RawRecord, RawValue};
use super::report::{FieldErrors, ValidationResult};
use super::rules::{FieldKind, FieldSpec, RuleKind};
use super::schema::RecordSchema;
use crate::age::{age_in_years, parse_birth_date};

/// Regex pattern for the `local@domain.tld` shape.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Evaluate `schema` against `raw`, computing ages relative to today (UTC).
pub fn validate(schema: &RecordSchema, raw: &RawRecord) -> ValidationResult {
    validate_on(schema, raw, Utc::now().date_naive())
}

/// Evaluate `schema` against `raw` with an explicit evaluation date.
pub fn validate_on(schema: &RecordSchema, raw: &RawRecord, today: NaiveDate) -> ValidationResult {
    let mut errors = FieldErrors::new();
    let mut normalized = NormalizedRecord::default();

    for spec in schema.fields() {
        let candidate = Candidate::of(spec, raw.get(&spec.name));

        if spec.optional && matches!(candidate, Candidate::Empty) {
            continue;
        }

        let failed = spec
            .rules
            .iter()
            .find(|rule| !rule_passes(&rule.kind, &candidate, today));

        match failed {
            Some(rule) => errors.push(spec.name.clone(), rule.message.clone()),
            None => {
                if let Some(value) = candidate.into_value() {
                    normalized.insert(spec.name.clone(), value);
                }
            }
        }
    }

    if !errors.is_empty() {
        return ValidationResult::Rejected(errors);
    }

    for refinement in schema.refinements() {
        if !refinement.check.holds(&normalized) {
            errors.push(refinement.target.clone(), refinement.message.clone());
        }
    }

    if errors.is_empty() {
        ValidationResult::Accepted(normalized)
    } else {
        ValidationResult::Rejected(errors)
    }
}

/// A raw value viewed through its field's declared kind.
enum Candidate<'a> {
    Empty,
    Text(&'a str),
    Bool(bool),
    /// Wrong type for the field (or an array/object). Fails any rule.
    Mismatch,
}

impl<'a> Candidate<'a> {
    fn of(spec: &FieldSpec, raw: &'a RawValue) -> Self {
        match (spec.kind, raw) {
            (_, RawValue::Absent) => Candidate::Empty,
            (FieldKind::Text, RawValue::Text(s)) => {
                let s = if spec.trim { s.trim() } else { s.as_str() };
                if s.is_empty() {
                    Candidate::Empty
                } else {
                    Candidate::Text(s)
                }
            }
            (FieldKind::Boolean, RawValue::Bool(b)) => Candidate::Bool(*b),
            _ => Candidate::Mismatch,
        }
    }

    fn into_value(self) -> Option<FieldValue> {
        match self {
            Candidate::Text(s) => Some(FieldValue::Text(s.to_string())),
            Candidate::Bool(b) => Some(FieldValue::Bool(b)),
            Candidate::Empty | Candidate::Mismatch => None,
        }
    }

    /// Text view for string rules; an empty value reads as `""`.
    fn as_text(&self) -> Option<&'a str> {
        match self {
            Candidate::Empty => Some(""),
            Candidate::Text(s) => Some(s),
            Candidate::Bool(_) | Candidate::Mismatch => None,
        }
    }
}

fn rule_passes(kind: &RuleKind, candidate: &Candidate<'_>, today: NaiveDate) -> bool {
    if matches!(candidate, Candidate::Mismatch) {
        return false;
    }

    match kind {
        RuleKind::Required => !matches!(candidate, Candidate::Empty),
        RuleKind::MustBeTrue => matches!(candidate, Candidate::Bool(true)),
        RuleKind::MinLength(min) => candidate
            .as_text()
            .is_some_and(|s| s.chars().count() >= *min),
        RuleKind::MaxLength(max) => candidate
            .as_text()
            .is_some_and(|s| s.chars().count() <= *max),
        RuleKind::Pattern(re) => candidate.as_text().is_some_and(|s| re.is_match(s)),
        RuleKind::Email => candidate.as_text().is_some_and(|s| EMAIL_RE.is_match(s)),
        RuleKind::PasswordStrength => candidate.as_text().is_some_and(has_password_mix),
        RuleKind::MinAge(years) => candidate
            .as_text()
            .and_then(parse_birth_date)
            .is_some_and(|birth| age_in_years(birth, today) >= *years as i32),
    }
}

/// One ASCII lowercase letter, one ASCII uppercase letter and one ASCII
/// digit, anywhere. Accented letters count toward none of them.
fn has_password_mix(s: &str) -> bool {
    let (mut lower, mut upper, mut digit) = (false, false, false);
    for c in s.chars() {
        lower |= c.is_ascii_lowercase();
        upper |= c.is_ascii_uppercase();
        digit |= c.is_ascii_digit();
    }
    lower && upper && digit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::{FieldRule, Refinement, RefinementCheck};
    use assert_matches::assert_matches;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn run(schema: &RecordSchema, raw: &RawRecord) -> ValidationResult {
        validate_on(schema, raw, today())
    }

    fn single_field(spec: FieldSpec) -> RecordSchema {
        RecordSchema::builder().field(spec).build().unwrap()
    }

    #[test]
    fn stops_at_first_failing_rule_of_a_field() {
        let schema = single_field(
            FieldSpec::text("name")
                .rule(FieldRule::required("required"))
                .rule(FieldRule::min_length(2, "too short"))
                .rule(FieldRule::max_length(3, "too long")),
        );
        let result = run(&schema, &RawRecord::new());
        let errors = result.errors().unwrap();
        assert_eq!(errors.get("name"), Some(&["required".to_string()][..]));
    }

    #[test]
    fn every_field_is_attempted() {
        let schema = RecordSchema::builder()
            .field(FieldSpec::text("a").rule(FieldRule::required("a missing")))
            .field(FieldSpec::text("b").rule(FieldRule::required("b missing")))
            .build()
            .unwrap();
        let result = run(&schema, &RawRecord::new());
        let fields: Vec<_> = result.errors().unwrap().fields().collect();
        assert_eq!(fields, ["a", "b"]);
    }

    #[test]
    fn optional_empty_field_skips_rules_and_is_omitted() {
        let schema = single_field(
            FieldSpec::text("phone")
                .optional()
                .rule(FieldRule::min_length(5, "short")),
        );
        let result = run(&schema, &RawRecord::new().with_text("phone", "   "));
        assert_matches!(result, ValidationResult::Accepted(record) if !record.contains("phone"));
    }

    #[test]
    fn text_is_trimmed_unless_untrimmed() {
        let schema = RecordSchema::builder()
            .field(FieldSpec::text("name"))
            .field(FieldSpec::text("secret").untrimmed())
            .build()
            .unwrap();
        let raw = RawRecord::new()
            .with_text("name", "  Ana  ")
            .with_text("secret", " pw ");
        let record = run(&schema, &raw).into_result().unwrap();
        assert_eq!(record.text("name"), Some("Ana"));
        assert_eq!(record.text("secret"), Some(" pw "));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let schema = single_field(FieldSpec::text("name").rule(FieldRule::max_length(3, "long")));
        assert!(run(&schema, &RawRecord::new().with_text("name", "Zoë")).is_accepted());
    }

    #[test]
    fn wrong_type_fails_the_first_rule() {
        let schema = single_field(
            FieldSpec::text("name")
                .rule(FieldRule::required("required"))
                .rule(FieldRule::min_length(2, "short")),
        );
        let result = run(&schema, &RawRecord::new().with_bool("name", true));
        assert_eq!(result.errors().unwrap().first("name"), Some("required"));
    }

    #[test]
    fn false_is_present_but_not_true() {
        let schema = single_field(
            FieldSpec::boolean("acceptsTerms")
                .rule(FieldRule::required("missing"))
                .rule(FieldRule::must_be_true("must accept")),
        );
        let missing = run(&schema, &RawRecord::new());
        let declined = run(&schema, &RawRecord::new().with_bool("acceptsTerms", false));
        let accepted = run(&schema, &RawRecord::new().with_bool("acceptsTerms", true));

        assert_eq!(missing.errors().unwrap().first("acceptsTerms"), Some("missing"));
        assert_eq!(declined.errors().unwrap().first("acceptsTerms"), Some("must accept"));
        assert_eq!(accepted.into_result().unwrap().flag("acceptsTerms"), Some(true));
    }

    #[test]
    fn password_mix_is_order_independent() {
        assert!(has_password_mix("1aB"));
        assert!(has_password_mix("Bb9"));
        assert!(!has_password_mix("abcdefgh"));
        assert!(!has_password_mix("ABCDEFG1"));
        assert!(!has_password_mix("abcdEFGH"));
    }

    #[test]
    fn password_mix_ignores_non_ascii_letters() {
        assert!(!has_password_mix("abcdefÉ1"));
        assert!(!has_password_mix("ÀBCDEFG1"));
        assert!(has_password_mix("ÉÀÇ1Abc"));
    }

    #[test]
    fn unanchored_pattern_matches_anywhere() {
        let code = |expr: &str| {
            single_field(
                FieldSpec::text("code").rule(FieldRule::pattern(Regex::new(expr).unwrap(), "digits")),
            )
        };
        let raw = RawRecord::new().with_text("code", "ab123cd");

        assert!(run(&code("[0-9]{3}"), &raw).is_accepted());
        let result = run(&code("^[0-9]{3}$"), &raw);
        assert_eq!(result.errors().unwrap().first("code"), Some("digits"));
    }

    #[test]
    fn email_shape() {
        assert!(EMAIL_RE.is_match("a@b.com"));
        assert!(!EMAIL_RE.is_match("a@b"));
        assert!(!EMAIL_RE.is_match("a b@c.com"));
        assert!(!EMAIL_RE.is_match("@b.com"));
    }

    #[test]
    fn min_age_uses_evaluation_date() {
        let schema = single_field(FieldSpec::text("birthDate").rule(FieldRule::min_age(18, "minor")));
        let adult = RawRecord::new().with_text("birthDate", "2006-06-01");
        let minor = RawRecord::new().with_text("birthDate", "2006-06-02");
        let garbage = RawRecord::new().with_text("birthDate", "yesterday");

        assert!(run(&schema, &adult).is_accepted());
        assert_eq!(run(&schema, &minor).errors().unwrap().first("birthDate"), Some("minor"));
        assert_eq!(run(&schema, &garbage).errors().unwrap().first("birthDate"), Some("minor"));
    }

    #[test]
    fn refinements_are_skipped_while_any_field_fails() {
        let schema = RecordSchema::builder()
            .field(FieldSpec::text("a").rule(FieldRule::required("a missing")))
            .field(FieldSpec::text("b"))
            .field(FieldSpec::text("c"))
            .refine(Refinement::fields_equal("b", "c", "b != c"))
            .build()
            .unwrap();
        let raw = RawRecord::new().with_text("b", "x").with_text("c", "y");
        let errors = run(&schema, &raw).errors().cloned().unwrap();
        assert!(errors.contains("a"));
        assert!(!errors.contains("c"));
    }

    #[test]
    fn multiple_refinements_append_to_the_same_target() {
        fn never(_: &NormalizedRecord) -> bool {
            false
        }

        let schema = RecordSchema::builder()
            .field(FieldSpec::text("x"))
            .refine(Refinement::new(RefinementCheck::Custom(never), "x", "first"))
            .refine(Refinement::new(RefinementCheck::Custom(never), "x", "second"))
            .build()
            .unwrap();
        let result = run(&schema, &RawRecord::new().with_text("x", "v"));
        assert_eq!(
            result.errors().unwrap().get("x"),
            Some(&["first".to_string(), "second".to_string()][..])
        );
    }

    #[test]
    fn repeated_calls_give_identical_results() {
        let schema = single_field(FieldSpec::text("name").rule(FieldRule::min_length(2, "short")));
        let raw = RawRecord::new().with_text("name", "J");
        assert_eq!(run(&schema, &raw), run(&schema, &raw));
    }
}
