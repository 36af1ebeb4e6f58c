use std::sync::Arc;

use async_trait::async_trait;

use super::{NotificationGate, Strategy};
use crate::error::AppResult;
use crate::events::{ContainerStateChanged, DomainEvent};
use crate::exporters::ExporterRegistry;
use crate::render::Renderer;

/// Notifies on every state change of its object
pub struct SendAllStrategy {
    gate: NotificationGate,
    renderer: Arc<dyn Renderer<ContainerStateChanged>>,
}

impl SendAllStrategy {
    pub fn new(
        object_id: impl Into<String>,
        exporter_id: impl Into<String>,
        registry: &ExporterRegistry,
        renderer: Arc<dyn Renderer<ContainerStateChanged>>,
    ) -> AppResult<Self> {
        Ok(Self {
            gate: NotificationGate::new(object_id, exporter_id, registry)?,
            renderer,
        })
    }
}

#[async_trait]
impl Strategy for SendAllStrategy {
    fn gate(&self) -> &NotificationGate {
        &self.gate
    }

    async fn accept(&self, event: &DomainEvent) -> AppResult<()> {
        match event {
            DomainEvent::ContainerStateChanged(changed)
                if changed.container_id == self.gate.object_id() =>
            {
                self.gate.send(&self.renderer.render(changed)).await
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "send_all"
    }
}
