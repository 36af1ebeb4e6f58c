use serde::{Deserialize, Serialize};

use crate::models::{ContainerState, Notification};

/// A container was observed in a new state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStateChanged {
    pub container_id: String,
    pub state: ContainerState,
}

/// A rendered notification about a container, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerNotification {
    pub container_id: String,
    pub notification: Notification,
}

/// Unified domain event type for the event bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    ContainerStateChanged(ContainerStateChanged),
    ContainerNotification(ContainerNotification),
}

impl DomainEvent {
    pub fn state_changed(container_id: impl Into<String>, state: ContainerState) -> Self {
        DomainEvent::ContainerStateChanged(ContainerStateChanged {
            container_id: container_id.into(),
            state,
        })
    }

    pub fn notification(container_id: impl Into<String>, notification: Notification) -> Self {
        DomainEvent::ContainerNotification(ContainerNotification {
            container_id: container_id.into(),
            notification,
        })
    }

    /// Id of the object this event is about
    pub fn object_id(&self) -> &str {
        match self {
            DomainEvent::ContainerStateChanged(e) => &e.container_id,
            DomainEvent::ContainerNotification(e) => &e.container_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DomainEvent::ContainerStateChanged(_) => "container_state_changed",
            DomainEvent::ContainerNotification(_) => "container_notification",
        }
    }
}
