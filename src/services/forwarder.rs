//! Delivers rendered notification events through an exporter.

use std::sync::Arc;

use async_trait::async_trait;

use super::EventHandler;
use crate::error::AppResult;
use crate::events::DomainEvent;
use crate::exporters::{Exporter, ExporterRegistry};

/// Sends every `ContainerNotification` event through one exporter
pub struct NotificationForwarder {
    exporter_id: String,
    exporter: Arc<dyn Exporter>,
}

impl NotificationForwarder {
    /// Creates a forwarder for the exporter registered under `exporter_id`
    ///
    /// # Errors
    /// `AppError::ExporterNotFound` if the id is unknown
    pub fn new(exporter_id: impl Into<String>, registry: &ExporterRegistry) -> AppResult<Self> {
        let exporter_id = exporter_id.into();
        let exporter = registry.get(&exporter_id)?;
        Ok(Self {
            exporter_id,
            exporter,
        })
    }

    pub fn exporter_id(&self) -> &str {
        &self.exporter_id
    }
}

#[async_trait]
impl EventHandler for NotificationForwarder {
    async fn handle_event(&self, event: &DomainEvent) -> AppResult<()> {
        match event {
            DomainEvent::ContainerNotification(n) => self.exporter.send(&n.notification).await,
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "notification_forwarder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::exporters::ChannelExporter;
    use crate::models::{ContainerState, Notification};

    #[tokio::test]
    async fn test_forwards_only_notifications() {
        let (exporter, mut rx) = ChannelExporter::channel();
        let mut registry = ExporterRegistry::new();
        registry.register("chan", exporter);
        let forwarder = NotificationForwarder::new("chan", &registry).unwrap();

        forwarder
            .handle_event(&DomainEvent::state_changed("c1", ContainerState::Running))
            .await
            .unwrap();
        forwarder
            .handle_event(&DomainEvent::notification("c1", Notification::text("ping")))
            .await
            .unwrap();

        assert_eq!(rx.recv().await.unwrap().body(), "ping");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unknown_exporter() {
        let result = NotificationForwarder::new("ghost", &ExporterRegistry::new());
        assert!(matches!(result, Err(AppError::ExporterNotFound { .. })));
    }
}
