//! Configuration settings structures for herald-rs
//!
//! Everything here can be loaded from TOML files and `HERALD_*` environment
//! variables. Every section has defaults, so an empty file is a valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, LogFormat, LoggerConfig};
use crate::models::ContainerState;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "herald-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_true() -> bool {
    true
}

fn default_bus_capacity() -> usize {
    crate::events::DEFAULT_CAPACITY
}

fn default_signaling_exporter() -> String {
    crate::exporters::registry::CONSOLE_EXPORTER_ID.to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console sink of the diagnostic logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Use ANSI colors when stderr is a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// Logger configuration as written in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    #[serde(default)]
    pub console: ConsoleSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: ConsoleSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Converts the file representation into the runtime `LoggerConfig`
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format: LogFormat = self
            .format
            .parse()
            .map_err(|e: anyhow::Error| ConfigError::validation("logger.format", e.to_string()))?;
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);

        let config = LoggerConfig {
            level: self.level,
            format,
            console,
        };
        config
            .validate()
            .map_err(|e| ConfigError::validation("logger.level", e.to_string()))?;
        Ok(config)
    }
}

// ============================================================================
// Event Bus Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBusConfig {
    /// Events buffered per subscriber before the slowest one starts lagging
    #[serde(default = "default_bus_capacity")]
    pub capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: default_bus_capacity(),
        }
    }
}

// ============================================================================
// Exporter Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleFormat {
    #[default]
    Text,
    Json,
}

/// Settings of the `console` exporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleExporterConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub target: ConsoleTarget,

    #[serde(default)]
    pub format: ConsoleFormat,

    /// Prefix every line with the delivery time
    #[serde(default = "default_true")]
    pub timestamps: bool,
}

impl Default for ConsoleExporterConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            target: ConsoleTarget::default(),
            format: ConsoleFormat::default(),
            timestamps: default_true(),
        }
    }
}

/// Settings of the `log` exporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogExporterConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for LogExporterConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExportersConfig {
    #[serde(default)]
    pub console: ConsoleExporterConfig,

    #[serde(default)]
    pub log: LogExporterConfig,
}

impl ExportersConfig {
    /// Ids of the exporters that will be registered
    pub fn enabled_ids(&self) -> Vec<&'static str> {
        use crate::exporters::registry::{CONSOLE_EXPORTER_ID, LOG_EXPORTER_ID};

        let mut ids = Vec::new();
        if self.console.enabled {
            ids.push(CONSOLE_EXPORTER_ID);
        }
        if self.log.enabled {
            ids.push(LOG_EXPORTER_ID);
        }
        ids
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled_ids().contains(&id)
    }
}

// ============================================================================
// Dispatch Configuration
// ============================================================================

/// The send-all signaling path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Exporter that receives every rendered notification
    #[serde(default = "default_signaling_exporter")]
    pub exporter: String,
}

impl Default for SignalingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            exporter: default_signaling_exporter(),
        }
    }
}

/// Which strategy a monitor uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Forward every state change
    #[default]
    SendAll,
    /// Forward only actual transitions, optionally filtered to some states
    Transition,
}

/// One `[[monitors]]` entry: a strategy bound to an object and an exporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub object_id: String,

    pub exporter: String,

    #[serde(default)]
    pub strategy: StrategyKind,

    /// States a transition strategy reports; empty means all
    #[serde(default)]
    pub states: Vec<ContainerState>,

    /// Initial gate state
    #[serde(default = "default_true")]
    pub enabled: bool,
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub event_bus: EventBusConfig,

    #[serde(default)]
    pub exporters: ExportersConfig,

    #[serde(default)]
    pub signaling: SignalingConfig,

    #[serde(default)]
    pub monitors: Vec<MonitorConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        assert_eq!(parse(""), Settings::default());
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "herald-rs");
        assert_eq!(settings.application.version, crate::pkg_version());
        assert_eq!(settings.logger.level, "info");
        assert_eq!(settings.logger.format, "full");
        assert_eq!(settings.event_bus.capacity, 1024);
        assert!(settings.exporters.console.enabled);
        assert!(settings.exporters.log.enabled);
        assert_eq!(settings.exporters.console.target, ConsoleTarget::Stdout);
        assert!(settings.signaling.enabled);
        assert_eq!(settings.signaling.exporter, "console");
        assert!(settings.monitors.is_empty());
    }

    #[test]
    fn test_parse_monitors() {
        let settings = parse(
            r#"
[exporters.console]
target = "stderr"
format = "json"

[[monitors]]
object_id = "db"
exporter = "log"

[[monitors]]
object_id = "web"
exporter = "console"
strategy = "transition"
states = ["exited", "dead"]
enabled = false
"#,
        );

        assert_eq!(settings.exporters.console.target, ConsoleTarget::Stderr);
        assert_eq!(settings.exporters.console.format, ConsoleFormat::Json);
        assert_eq!(settings.monitors.len(), 2);
        assert_eq!(settings.monitors[0].strategy, StrategyKind::SendAll);
        assert!(settings.monitors[0].enabled);
        assert_eq!(settings.monitors[1].strategy, StrategyKind::Transition);
        assert_eq!(
            settings.monitors[1].states,
            vec![ContainerState::Exited, ContainerState::Dead]
        );
        assert!(!settings.monitors[1].enabled);
    }

    #[test]
    fn test_enabled_exporter_ids() {
        let mut exporters = ExportersConfig::default();
        assert_eq!(exporters.enabled_ids(), vec!["console", "log"]);

        exporters.console.enabled = false;
        assert!(!exporters.is_enabled("console"));
        assert!(exporters.is_enabled("log"));
    }

    #[test]
    fn test_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            format: "json".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
        };
        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.console.colored);
    }

    #[test]
    fn test_into_logger_config_rejects_unknown_format() {
        let settings = LoggerSettings {
            format: "xml".to_string(),
            ..LoggerSettings::default()
        };
        let err = settings.into_logger_config().unwrap_err();
        assert_eq!(err.field(), Some("logger.format"));
    }
}
