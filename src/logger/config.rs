//! Runtime logger configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Main logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub level: String, // converted to tracing::Level
    pub format: LogFormat,
    pub console: ConsoleConfig,
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<()> {
        self.parse_level()
            .with_context(|| format!("Invalid log level: {}", self.level))?;
        Ok(())
    }

    /// Parse the log level string into a tracing::Level
    pub fn parse_level(&self) -> Result<Level> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                self.level
            ),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            console: ConsoleConfig::default(),
        }
    }
}

/// Console (stderr) output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Invalid log format '{}'. Valid formats are: full, compact, json", s),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LoggerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.format, LogFormat::Full);
    }

    #[test]
    fn test_invalid_log_level() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..LoggerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_log_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO"] {
            let config = LoggerConfig {
                level: level.to_string(),
                ..LoggerConfig::default()
            };
            assert!(config.validate().is_ok(), "Level {} should be valid", level);
        }
        let config = LoggerConfig {
            level: "warn".to_string(),
            ..LoggerConfig::default()
        };
        assert_eq!(config.parse_level().unwrap(), Level::WARN);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("Compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Compact.as_str(), "compact");
    }
}
