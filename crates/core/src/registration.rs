//! Registration form schemas and their typed records.
//!
//! Each [`SchemaVariant`] is built once per process and shared by every
//! submission path. Messages are user-facing and returned verbatim.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{FieldRule, FieldSpec, RecordSchema, Refinement, SchemaError};

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_CONFIRM_PASSWORD: &str = "confirmPassword";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_BIRTH_DATE: &str = "birthDate";
pub const FIELD_ACCEPTS_TERMS: &str = "acceptsTerms";

// ---------------------------------------------------------------------------
// Constraints and messages
// ---------------------------------------------------------------------------

pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 50;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const MINIMUM_AGE: u32 = 18;

/// `(DD) DDDDD-DDDD`, ASCII digits only.
pub const PHONE_PATTERN: &str = r"^\([0-9]{2}\) [0-9]{5}-[0-9]{4}$";

pub const MSG_NAME_REQUIRED: &str = "Nome é obrigatório";
pub const MSG_NAME_TOO_SHORT: &str = "Nome deve ter pelo menos 2 caracteres";
pub const MSG_NAME_TOO_LONG: &str = "Nome deve ter no máximo 50 caracteres";
pub const MSG_EMAIL_REQUIRED: &str = "E-mail é obrigatório";
pub const MSG_EMAIL_INVALID: &str = "E-mail inválido";
pub const MSG_PASSWORD_REQUIRED: &str = "Senha é obrigatória";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Senha deve ter pelo menos 8 caracteres";
pub const MSG_PASSWORD_WEAK: &str =
    "Senha deve conter pelo menos uma letra maiúscula, uma minúscula e um número";
pub const MSG_CONFIRM_PASSWORD_REQUIRED: &str = "Confirmação de senha é obrigatória";
pub const MSG_PASSWORD_MISMATCH: &str = "Senhas não coincidem";
pub const MSG_PHONE_FORMAT: &str = "Telefone deve estar no formato (99) 99999-9999";
pub const MSG_UNDERAGE: &str = "Você deve ter pelo menos 18 anos";
pub const MSG_TERMS_REQUIRED: &str = "Aceite dos termos é obrigatório";
pub const MSG_TERMS_NOT_ACCEPTED: &str = "Você deve aceitar os termos de uso";

/// Success message returned once a submission has been processed.
pub const MSG_SUBMISSION_PROCESSED: &str = "Formulário processado com sucesso!";

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Field specs
// ---------------------------------------------------------------------------

fn name_field() -> FieldSpec {
    FieldSpec::text(FIELD_NAME)
        .rule(FieldRule::required(MSG_NAME_REQUIRED))
        .rule(FieldRule::min_length(NAME_MIN_LENGTH, MSG_NAME_TOO_SHORT))
        .rule(FieldRule::max_length(NAME_MAX_LENGTH, MSG_NAME_TOO_LONG))
}

fn email_field() -> FieldSpec {
    FieldSpec::text(FIELD_EMAIL)
        .rule(FieldRule::required(MSG_EMAIL_REQUIRED))
        .rule(FieldRule::email(MSG_EMAIL_INVALID))
}

fn password_field() -> FieldSpec {
    FieldSpec::text(FIELD_PASSWORD)
        .untrimmed()
        .rule(FieldRule::required(MSG_PASSWORD_REQUIRED))
        .rule(FieldRule::min_length(PASSWORD_MIN_LENGTH, MSG_PASSWORD_TOO_SHORT))
        .rule(FieldRule::password_strength(MSG_PASSWORD_WEAK))
}

fn confirm_password_field() -> FieldSpec {
    FieldSpec::text(FIELD_CONFIRM_PASSWORD)
        .untrimmed()
        .rule(FieldRule::required(MSG_CONFIRM_PASSWORD_REQUIRED))
}

fn phone_field() -> FieldSpec {
    FieldSpec::text(FIELD_PHONE)
        .optional()
        .rule(FieldRule::pattern(PHONE_RE.clone(), MSG_PHONE_FORMAT))
}

fn birth_date_field() -> FieldSpec {
    FieldSpec::text(FIELD_BIRTH_DATE)
        .optional()
        .rule(FieldRule::min_age(MINIMUM_AGE, MSG_UNDERAGE))
}

fn accepts_terms_field() -> FieldSpec {
    FieldSpec::boolean(FIELD_ACCEPTS_TERMS)
        .rule(FieldRule::required(MSG_TERMS_REQUIRED))
        .rule(FieldRule::must_be_true(MSG_TERMS_NOT_ACCEPTED))
}

fn passwords_match() -> Refinement {
    Refinement::fields_equal(FIELD_PASSWORD, FIELD_CONFIRM_PASSWORD, MSG_PASSWORD_MISMATCH)
}

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

/// Email and password only, with a plain length check on the password.
pub fn credentials_schema() -> Result<RecordSchema, SchemaError> {
    RecordSchema::builder()
        .field(email_field())
        .field(
            FieldSpec::text(FIELD_PASSWORD)
                .untrimmed()
                .rule(FieldRule::required(MSG_PASSWORD_REQUIRED))
                .rule(FieldRule::min_length(PASSWORD_MIN_LENGTH, MSG_PASSWORD_TOO_SHORT)),
        )
        .build()
}

/// Name, email, optional phone and a strong password. No confirmation.
pub fn profile_schema() -> Result<RecordSchema, SchemaError> {
    RecordSchema::builder()
        .field(
            FieldSpec::text(FIELD_NAME)
                .rule(FieldRule::required(MSG_NAME_REQUIRED))
                .rule(FieldRule::min_length(NAME_MIN_LENGTH, MSG_NAME_TOO_SHORT)),
        )
        .field(email_field())
        .field(phone_field())
        .field(password_field())
        .build()
}

/// The full registration record.
pub fn registration_schema() -> Result<RecordSchema, SchemaError> {
    RecordSchema::builder()
        .field(name_field())
        .field(email_field())
        .field(password_field())
        .field(confirm_password_field())
        .field(phone_field())
        .field(accepts_terms_field())
        .refine(passwords_match())
        .build()
}

/// The full registration record plus an optional minimum-age birth date.
pub fn registration_with_birth_date_schema() -> Result<RecordSchema, SchemaError> {
    RecordSchema::builder()
        .field(name_field())
        .field(email_field())
        .field(password_field())
        .field(confirm_password_field())
        .field(phone_field())
        .field(birth_date_field())
        .field(accepts_terms_field())
        .refine(passwords_match())
        .build()
}

static CREDENTIALS: LazyLock<RecordSchema> =
    LazyLock::new(|| credentials_schema().expect("credentials schema is well-formed"));
static PROFILE: LazyLock<RecordSchema> =
    LazyLock::new(|| profile_schema().expect("profile schema is well-formed"));
static REGISTRATION: LazyLock<RecordSchema> =
    LazyLock::new(|| registration_schema().expect("registration schema is well-formed"));
static REGISTRATION_WITH_BIRTH_DATE: LazyLock<RecordSchema> = LazyLock::new(|| {
    registration_with_birth_date_schema().expect("birth date schema is well-formed")
});

/// A named, shared schema instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaVariant {
    Credentials,
    Profile,
    Registration,
    RegistrationWithBirthDate,
}

impl SchemaVariant {
    pub const ALL: [SchemaVariant; 4] = [
        SchemaVariant::Credentials,
        SchemaVariant::Profile,
        SchemaVariant::Registration,
        SchemaVariant::RegistrationWithBirthDate,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            SchemaVariant::Credentials => "credentials",
            SchemaVariant::Profile => "profile",
            SchemaVariant::Registration => "registration",
            SchemaVariant::RegistrationWithBirthDate => "registration-with-birth-date",
        }
    }

    /// The process-wide schema for this variant. Panics on first use if the
    /// declaration is inconsistent.
    pub fn schema(self) -> &'static RecordSchema {
        match self {
            SchemaVariant::Credentials => &CREDENTIALS,
            SchemaVariant::Profile => &PROFILE,
            SchemaVariant::Registration => &REGISTRATION,
            SchemaVariant::RegistrationWithBirthDate => &REGISTRATION_WITH_BIRTH_DATE,
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SchemaVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaVariant::ALL
            .into_iter()
            .find(|v| v.slug() == s)
            .ok_or_else(|| CoreError::UnknownVariant(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Typed records
// ---------------------------------------------------------------------------

/// An accepted registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    pub accepts_terms: bool,
}

impl RegistrationForm {
    /// Loggable summary that leaves out both password fields.
    pub fn redacted(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "birthDate": self.birth_date,
            "acceptsTerms": self.accepts_terms,
        })
    }
}

/// Accepted email/password pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
