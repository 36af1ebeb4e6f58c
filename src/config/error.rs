//! Configuration error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A loaded value breaks a validation rule
    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    /// Errors raised by the `config` crate while merging sources
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity(message: impl Into<String>) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }

    /// Field name for validation errors, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}
