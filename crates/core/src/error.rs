use crate::validation::record::NormalizeError;
use crate::validation::schema::SchemaError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Schema configuration defect: {0}")]
    Schema(#[from] SchemaError),

    #[error("Malformed input: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Unknown schema variant: {0}")]
    UnknownVariant(String),
}
