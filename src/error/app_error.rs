use thiserror::Error;

use crate::config::error::ConfigError;

/// Application-wide error type that represents all possible errors in the system.
///
/// Repository misses and unknown exporters are classified here; delivery
/// failures are carried opaquely in `Delivery` so the dispatch core can
/// pass them through without interpreting them.
#[derive(Error, Debug)]
pub enum AppError {
    /// No entity stored under the given id
    #[error("Entity not found: {entity} with id={id}")]
    EntityNotFound { entity: String, id: String },

    /// No exporter registered under the given id
    #[error("Exporter not found: {id}")]
    ExporterNotFound { id: String },

    /// An exporter failed to deliver a notification
    #[error("Delivery via exporter '{exporter}' failed")]
    Delivery {
        exporter: String,
        #[source]
        source: anyhow::Error,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Malformed input record
    #[error("Invalid input at line {line}")]
    InvalidInput {
        line: usize,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn entity_not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        AppError::EntityNotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn delivery(exporter: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Delivery {
            exporter: exporter.into(),
            source: source.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            ConfigError::FileNotFound(_) => "config_file".to_string(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_not_found_message() {
        let err = AppError::entity_not_found("container", "c1");
        assert_eq!(err.to_string(), "Entity not found: container with id=c1");
    }

    #[test]
    fn test_delivery_keeps_source() {
        let err = AppError::delivery("console", anyhow::anyhow!("stdout closed"));
        assert_eq!(err.to_string(), "Delivery via exporter 'console' failed");
        let source = std::error::Error::source(&err).expect("source should be kept");
        assert_eq!(source.to_string(), "stdout closed");
    }

    #[test]
    fn test_from_config_validation_error() {
        let err: AppError = ConfigError::validation("event_bus.capacity", "must be positive").into();
        match err {
            AppError::Configuration { key, .. } => assert_eq!(key, "event_bus.capacity"),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }
}
