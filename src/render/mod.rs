//! Rendering of entity snapshots and events into notifications.

use crate::events::ContainerStateChanged;
use crate::models::{Container, Notification};

/// Turns a value into a notification. Must be pure.
pub trait Renderer<T: ?Sized>: Send + Sync {
    fn render(&self, value: &T) -> Notification;
}

impl<T: ?Sized, F> Renderer<T> for F
where
    F: Fn(&T) -> Notification + Send + Sync,
{
    fn render(&self, value: &T) -> Notification {
        self(value)
    }
}

/// Default renderer for container state changes
#[derive(Debug, Clone, Copy, Default)]
pub struct StateChangeRenderer;

const TITLE: &str = "Container state changed";

impl Renderer<Container> for StateChangeRenderer {
    fn render(&self, container: &Container) -> Notification {
        let mut body = format!(
            "Container {} is now {}",
            container.display_name(),
            container.state
        );
        if !container.image.is_empty() {
            body.push_str(&format!(" (image {})", container.image));
        }

        let notification = Notification::text(body)
            .with_title(TITLE)
            .with_metadata("container_id", container.id.as_str())
            .with_metadata("state", container.state.as_str());

        if container.image.is_empty() {
            notification
        } else {
            notification.with_metadata("image", container.image.as_str())
        }
    }
}

impl Renderer<ContainerStateChanged> for StateChangeRenderer {
    fn render(&self, event: &ContainerStateChanged) -> Notification {
        Notification::text(format!(
            "Container {} is now {}",
            event.container_id, event.state
        ))
        .with_title(TITLE)
        .with_metadata("container_id", event.container_id.as_str())
        .with_metadata("state", event.state.as_str())
    }
}
