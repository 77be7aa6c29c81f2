use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown report field: {0}")]
    UnknownField(String),
    #[error("unknown plot color: {0}")]
    UnknownColor(String),
    #[error("unknown query type: {0}")]
    UnknownQueryType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
