//! Exporter that turns notifications into structured log events.

use async_trait::async_trait;
use tracing::info;

use super::Exporter;
use crate::error::AppResult;
use crate::models::Notification;

/// Emits each notification as an `info` tracing event
#[derive(Debug, Clone, Copy, Default)]
pub struct LogExporter;

#[async_trait]
impl Exporter for LogExporter {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        let metadata = notification
            .metadata()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");

        info!(
            target: "herald::notification",
            title = notification.title().unwrap_or_default(),
            metadata = %metadata,
            "{}",
            notification.body()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
