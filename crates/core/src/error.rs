use crate::forms::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("identifier error: {0}")]
    Uuid(#[from] subs_uuid::UuidError),
    #[error("failed to read import file: {0}")]
    ImportRead(std::io::Error),
    #[error("failed to parse import file: {0}")]
    ImportParse(serde_json::Error),
    #[error("import has {actual} rows, exceeding the limit of {limit}")]
    TooManyRows { limit: usize, actual: usize },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
