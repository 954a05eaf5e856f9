//! # Generator Errors

use thiserror::Error;

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Default-values generator errors
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Invalid element name: '{0}'")]
    InvalidName(String),

    #[error("Invalid type name: '{0}'")]
    InvalidTypeName(String),

    #[error("Duplicate parameter: '{0}'")]
    DuplicateParameter(String),

    #[error("Invalid parameter argument '{0}': expected name=value")]
    InvalidArgument(String),

    #[error("Name pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
