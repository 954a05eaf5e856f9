//! CLI-specific error types

use std::fmt;
use std::io;

use crate::errors::{InjectError, InjectErrorCode};
use crate::generator::GeneratorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, output directory)
    IoError,
    /// Default-values document could not be generated
    GenerateFailed,
    /// Load, merge or validation failed
    InjectFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TREEFILL_CLI_CONFIG_ERROR",
            Self::IoError => "TREEFILL_CLI_IO_ERROR",
            Self::GenerateFailed => "TREEFILL_CLI_GENERATE_FAILED",
            Self::InjectFailed => "TREEFILL_CLI_INJECT_FAILED",
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<InjectError> for CliError {
    fn from(e: InjectError) -> Self {
        let code = match e.code() {
            InjectErrorCode::ConfigInvalid => CliErrorCode::ConfigError,
            _ => CliErrorCode::InjectFailed,
        };
        Self::new(code, e.to_string())
    }
}

impl From<GeneratorError> for CliError {
    fn from(e: GeneratorError) -> Self {
        Self::new(CliErrorCode::GenerateFailed, e.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
