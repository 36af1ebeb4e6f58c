//! Configuration validation logic

use std::collections::HashSet;

use crate::config::error::ConfigError;
use crate::config::settings::{
    EventBusConfig, ExportersConfig, LoggerSettings, MonitorConfig, Settings, SignalingConfig,
};
use crate::events::MAX_CAPACITY as MAX_BUS_CAPACITY;

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Level must be one of trace, debug, info, warn, error (case-insensitive)
    /// - Format must be one of full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl EventBusConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::validation(
                "event_bus.capacity",
                "Event bus capacity must be greater than 0.",
            ));
        }
        if self.capacity > MAX_BUS_CAPACITY {
            return Err(ConfigError::validation(
                "event_bus.capacity",
                format!(
                    "Event bus capacity {} exceeds the maximum of {}.",
                    self.capacity, MAX_BUS_CAPACITY
                ),
            ));
        }
        Ok(())
    }
}

impl SignalingConfig {
    /// The signaling exporter must be enabled when signaling is
    pub fn validate(&self, exporters: &ExportersConfig) -> Result<(), ConfigError> {
        if self.enabled {
            require_enabled_exporter("signaling.exporter", &self.exporter, exporters)?;
        }
        Ok(())
    }
}

impl MonitorConfig {
    /// Validate one monitor entry; `index` is its position for error reporting
    pub fn validate(&self, index: usize, exporters: &ExportersConfig) -> Result<(), ConfigError> {
        if self.object_id.trim().is_empty() {
            return Err(ConfigError::validation(
                format!("monitors[{}].object_id", index),
                "Monitor object id cannot be empty.".to_string(),
            ));
        }

        require_enabled_exporter(&format!("monitors[{}].exporter", index), &self.exporter, exporters)
    }
}

fn require_enabled_exporter(
    field: &str,
    exporter: &str,
    exporters: &ExportersConfig,
) -> Result<(), ConfigError> {
    if exporters.is_enabled(exporter) {
        return Ok(());
    }
    Err(ConfigError::validation(
        field,
        format!(
            "Exporter '{}' is unknown or disabled. Enabled exporters: [{}]",
            exporter,
            exporters.enabled_ids().join(", ")
        ),
    ))
}

impl Settings {
    /// Validate all configuration sections
    ///
    /// # Validation Rules
    /// - Logger level and format are known values
    /// - Event bus capacity is within `1..=MAX_BUS_CAPACITY`
    /// - Signaling and every monitor reference an enabled exporter
    /// - Monitor object ids are non-empty and `(object_id, exporter)` pairs are unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.event_bus.validate()?;
        self.signaling.validate(&self.exporters)?;

        let mut seen = HashSet::new();
        for (index, monitor) in self.monitors.iter().enumerate() {
            monitor.validate(index, &self.exporters)?;

            if !seen.insert((monitor.object_id.as_str(), monitor.exporter.as_str())) {
                return Err(ConfigError::validation(
                    format!("monitors[{}]", index),
                    format!(
                        "Duplicate monitor for object '{}' and exporter '{}'.",
                        monitor.object_id, monitor.exporter
                    ),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::StrategyKind;
    use proptest::prelude::*;

    fn monitor(object_id: &str, exporter: &str) -> MonitorConfig {
        MonitorConfig {
            object_id: object_id.to_string(),
            exporter: exporter.to_string(),
            strategy: StrategyKind::SendAll,
            states: vec![],
            enabled: true,
        }
    }

    fn assert_field(result: Result<(), ConfigError>, expected: &str) {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected validation error on {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = Settings::default();
        settings.logger.level = "verbose".to_string();
        assert_field(settings.validate(), "logger.level");
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut settings = Settings::default();
        settings.logger.level = "WARN".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut settings = Settings::default();
        settings.logger.format = "pretty".to_string();
        assert_field(settings.validate(), "logger.format");
    }

    #[test]
    fn test_zero_bus_capacity() {
        let mut settings = Settings::default();
        settings.event_bus.capacity = 0;
        assert_field(settings.validate(), "event_bus.capacity");
    }

    #[test]
    fn test_bus_capacity_upper_bound() {
        let mut settings = Settings::default();
        settings.event_bus.capacity = MAX_BUS_CAPACITY;
        assert!(settings.validate().is_ok());

        settings.event_bus.capacity = MAX_BUS_CAPACITY + 1;
        assert_field(settings.validate(), "event_bus.capacity");

        settings.event_bus.capacity = usize::MAX;
        assert_field(settings.validate(), "event_bus.capacity");
    }

    #[test]
    fn test_signaling_requires_enabled_exporter() {
        let mut settings = Settings::default();
        settings.exporters.console.enabled = false;
        assert_field(settings.validate(), "signaling.exporter");

        settings.signaling.enabled = false;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_monitor_unknown_exporter() {
        let mut settings = Settings::default();
        settings.monitors = vec![monitor("db", "log"), monitor("web", "pager")];
        assert_field(settings.validate(), "monitors[1].exporter");
    }

    #[test]
    fn test_monitor_empty_object_id() {
        let mut settings = Settings::default();
        settings.monitors = vec![monitor("  ", "log")];
        assert_field(settings.validate(), "monitors[0].object_id");
    }

    #[test]
    fn test_duplicate_monitor_pair() {
        let mut settings = Settings::default();
        settings.monitors = vec![
            monitor("db", "log"),
            monitor("db", "console"),
            monitor("db", "log"),
        ];
        assert_field(settings.validate(), "monitors[2]");
    }

    proptest! {
        /// Any level outside the known set is rejected, any inside is accepted
        #[test]
        fn prop_log_level_validation(level in "[a-z]{1,8}") {
            let settings = LoggerSettings {
                level: level.clone(),
                ..LoggerSettings::default()
            };
            let known = VALID_LOG_LEVELS.contains(&level.as_str());
            prop_assert_eq!(settings.validate().is_ok(), known);
        }
    }
}
