//! Console exporter writing one line per notification.

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::io::AsyncWriteExt;

use super::Exporter;
use crate::config::settings::{ConsoleExporterConfig, ConsoleFormat, ConsoleTarget};
use crate::error::{AppError, AppResult};
use crate::models::Notification;

/// Prints notifications to stdout or stderr
#[derive(Debug, Clone)]
pub struct ConsoleExporter {
    target: ConsoleTarget,
    format: ConsoleFormat,
    timestamps: bool,
}

impl ConsoleExporter {
    pub fn new(config: &ConsoleExporterConfig) -> Self {
        Self {
            target: config.target,
            format: config.format,
            timestamps: config.timestamps,
        }
    }

    /// Formats a notification as a single output line (without newline)
    pub fn format_line(&self, notification: &Notification) -> AppResult<String> {
        let now = self.timestamps.then(Timestamp::now);

        match self.format {
            ConsoleFormat::Text => {
                let mut line = String::new();
                if let Some(ts) = now {
                    line.push_str(&format!("[{}] ", ts));
                }
                if let Some(title) = notification.title() {
                    line.push_str(title);
                    line.push_str(": ");
                }
                line.push_str(notification.body());
                Ok(line)
            }
            ConsoleFormat::Json => {
                let mut value = serde_json::to_value(notification)
                    .map_err(|e| AppError::delivery(self.name(), e))?;
                if let (Some(ts), Some(object)) = (now, value.as_object_mut()) {
                    object.insert("timestamp".to_string(), serde_json::json!(ts.to_string()));
                }
                Ok(value.to_string())
            }
        }
    }
}

impl Default for ConsoleExporter {
    fn default() -> Self {
        Self::new(&ConsoleExporterConfig::default())
    }
}

#[async_trait]
impl Exporter for ConsoleExporter {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        let mut line = self.format_line(notification)?;
        line.push('\n');

        let result = match self.target {
            ConsoleTarget::Stdout => {
                let mut out = tokio::io::stdout();
                match out.write_all(line.as_bytes()).await {
                    Ok(()) => out.flush().await,
                    Err(e) => Err(e),
                }
            }
            ConsoleTarget::Stderr => {
                let mut out = tokio::io::stderr();
                match out.write_all(line.as_bytes()).await {
                    Ok(()) => out.flush().await,
                    Err(e) => Err(e),
                }
            }
        };

        result.map_err(|e| AppError::delivery(self.name(), e))
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
