//! Check command handler
//!
//! Validates configuration and wires the application without processing
//! any events.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::state::AppState;

pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Prints the report produced by [`CheckCommandHandler::report`]
    pub async fn execute(&self) -> AppResult<()> {
        for line in self.report()? {
            println!("{}", line);
        }
        Ok(())
    }

    /// Validates settings, builds the wiring and describes it
    pub fn report(&self) -> AppResult<Vec<String>> {
        self.config.validate()?;
        let state = AppState::from_settings(&self.config)?;

        let mut lines = vec![
            "✓ Configuration is valid".to_string(),
            format!("✓ Exporters: {}", state.exporters.ids().join(", ")),
        ];

        match self.config.signaling.enabled {
            true => lines.push(format!(
                "✓ Signaling: send every state change via '{}'",
                self.config.signaling.exporter
            )),
            false => lines.push("✓ Signaling: disabled".to_string()),
        }

        lines.push(format!("✓ Monitors: {}", state.monitoring.len()));
        for monitor in &self.config.monitors {
            lines.push(format!(
                "  - {} -> {} ({:?}{})",
                monitor.object_id,
                monitor.exporter,
                monitor.strategy,
                if monitor.enabled { "" } else { ", disabled" }
            ));
        }

        Ok(lines)
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{MonitorConfig, StrategyKind};
    use crate::error::AppError;

    #[test]
    fn test_report_default_settings() {
        let report = CheckCommandHandler::new(Settings::default()).report().unwrap();
        assert_eq!(report[0], "✓ Configuration is valid");
        assert_eq!(report[1], "✓ Exporters: console, log");
        assert_eq!(report[2], "✓ Signaling: send every state change via 'console'");
        assert_eq!(report[3], "✓ Monitors: 0");
    }

    #[test]
    fn test_report_lists_monitors() {
        let mut settings = Settings::default();
        settings.monitors.push(MonitorConfig {
            object_id: "db".to_string(),
            exporter: "log".to_string(),
            strategy: StrategyKind::Transition,
            states: vec![],
            enabled: false,
        });

        let report = CheckCommandHandler::new(settings).report().unwrap();
        assert_eq!(report.last().unwrap(), "  - db -> log (Transition, disabled)");
    }

    #[tokio::test]
    async fn test_invalid_settings_fail() {
        let mut settings = Settings::default();
        settings.exporters.console.enabled = false;

        let err = CheckCommandHandler::new(settings).execute().await.unwrap_err();
        assert!(matches!(err, AppError::Configuration { ref key, .. } if key == "signaling.exporter"));
    }
}
