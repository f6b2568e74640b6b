use thiserror::Error;

/// Unified error type for the rule core.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("handler codec error: {0}")]
    Codec(String),

    #[error("repository error: {0}")]
    Repository(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RuleError>;

impl From<anyhow::Error> for RuleError {
    fn from(err: anyhow::Error) -> Self {
        RuleError::Repository(err.to_string())
    }
}
