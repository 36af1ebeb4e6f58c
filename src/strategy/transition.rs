use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::trace;

use super::{NotificationGate, Strategy};
use crate::error::AppResult;
use crate::events::{ContainerStateChanged, DomainEvent};
use crate::exporters::ExporterRegistry;
use crate::models::ContainerState;
use crate::render::Renderer;

/// Notifies only when the observed state actually changes.
///
/// With a non-empty watch list only transitions into one of the watched
/// states are reported. The first observation counts as a transition.
pub struct TransitionStrategy {
    gate: NotificationGate,
    renderer: Arc<dyn Renderer<ContainerStateChanged>>,
    watched: HashSet<ContainerState>,
    last_state: Mutex<Option<ContainerState>>,
}

impl TransitionStrategy {
    pub fn new(
        object_id: impl Into<String>,
        exporter_id: impl Into<String>,
        registry: &ExporterRegistry,
        renderer: Arc<dyn Renderer<ContainerStateChanged>>,
        watched: impl IntoIterator<Item = ContainerState>,
    ) -> AppResult<Self> {
        Ok(Self {
            gate: NotificationGate::new(object_id, exporter_id, registry)?,
            renderer,
            watched: watched.into_iter().collect(),
            last_state: Mutex::new(None),
        })
    }

    /// Last state seen for the object, if any
    pub async fn last_state(&self) -> Option<ContainerState> {
        *self.last_state.lock().await
    }

    fn is_watched(&self, state: ContainerState) -> bool {
        self.watched.is_empty() || self.watched.contains(&state)
    }
}

#[async_trait]
impl Strategy for TransitionStrategy {
    fn gate(&self) -> &NotificationGate {
        &self.gate
    }

    async fn accept(&self, event: &DomainEvent) -> AppResult<()> {
        let DomainEvent::ContainerStateChanged(changed) = event else {
            return Ok(());
        };
        if changed.container_id != self.gate.object_id() {
            return Ok(());
        }

        // Remember the state before delivering; the lock is not held across the send
        let previous = self.last_state.lock().await.replace(changed.state);

        if previous == Some(changed.state) {
            trace!(object_id = %changed.container_id, state = %changed.state, "State unchanged");
            return Ok(());
        }
        if !self.is_watched(changed.state) {
            return Ok(());
        }

        let notification = self.renderer.render(changed);
        let notification = match previous {
            Some(previous) => notification.with_metadata("previous_state", previous.as_str()),
            None => notification,
        };
        self.gate.send(&notification).await
    }

    fn name(&self) -> &'static str {
        "transition"
    }
}
