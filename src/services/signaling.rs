//! Signaling policy that sends every state change instantly.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::EventHandler;
use crate::error::AppResult;
use crate::events::{DomainEvent, EventPublisher};
use crate::models::Container;
use crate::render::Renderer;
use crate::repositories::Repository;

/// Re-emits every container state change as a rendered notification event.
///
/// No filtering, batching or deduplication happens here; that kind of
/// policy belongs in a `Strategy`.
pub struct SignalingSendAll {
    containers: Arc<dyn Repository<Container>>,
    renderer: Arc<dyn Renderer<Container>>,
    publisher: Arc<dyn EventPublisher>,
}

impl SignalingSendAll {
    pub fn new(
        containers: Arc<dyn Repository<Container>>,
        renderer: Arc<dyn Renderer<Container>>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            containers,
            renderer,
            publisher,
        }
    }
}

#[async_trait]
impl EventHandler for SignalingSendAll {
    async fn handle_event(&self, event: &DomainEvent) -> AppResult<()> {
        let DomainEvent::ContainerStateChanged(changed) = event else {
            return Ok(());
        };

        let container = self.containers.get(&changed.container_id)?;
        let notification = self.renderer.render(&container);

        debug!(container_id = %container.id, state = %container.state, "Signaling state change");
        self.publisher
            .emit_event(DomainEvent::notification(container.id, notification));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "signaling_send_all"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::events::{ContainerNotification, EventBus, EventBusError};
    use crate::models::{ContainerState, Notification};
    use crate::render::StateChangeRenderer;
    use crate::repositories::InMemoryRepository;

    fn setup(containers: Vec<Container>) -> (SignalingSendAll, EventBus) {
        let bus = EventBus::new(16);
        let repo = Arc::new(InMemoryRepository::from_entities(containers));
        let service = SignalingSendAll::new(repo, Arc::new(StateChangeRenderer), Arc::new(bus.clone()));
        (service, bus)
    }

    #[tokio::test]
    async fn test_emits_one_rendered_notification() {
        let c1 = Container::new("c1", ContainerState::Running);
        let (service, bus) = setup(vec![c1.clone()]);
        let mut receiver = bus.subscribe();

        service
            .handle_event(&DomainEvent::state_changed("c1", ContainerState::Running))
            .await
            .unwrap();

        let emitted = receiver.try_recv().unwrap();
        assert_eq!(
            emitted,
            DomainEvent::ContainerNotification(ContainerNotification {
                container_id: "c1".to_string(),
                notification: StateChangeRenderer.render(&c1),
            })
        );
        assert!(matches!(receiver.try_recv(), Err(EventBusError::Empty)));
    }

    #[tokio::test]
    async fn test_renders_current_snapshot() {
        let (service, bus) = setup(vec![Container::new("c1", ContainerState::Running)]);
        let mut receiver = bus.subscribe();

        // Event state is only a hint; the repository holds the truth
        service
            .handle_event(&DomainEvent::state_changed("c1", ContainerState::Exited))
            .await
            .unwrap();

        match receiver.try_recv().unwrap() {
            DomainEvent::ContainerNotification(n) => {
                assert_eq!(n.notification.body(), "Container c1 is now running");
            }
            other => panic!("Expected notification event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_container_propagates_and_emits_nothing() {
        let (service, bus) = setup(vec![]);
        let mut receiver = bus.subscribe();

        let err = service
            .handle_event(&DomainEvent::state_changed("c1", ContainerState::Running))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EntityNotFound { ref id, .. } if id == "c1"));
        assert!(matches!(receiver.try_recv(), Err(EventBusError::Empty)));
    }

    #[tokio::test]
    async fn test_ignores_notification_events() {
        let (service, bus) = setup(vec![]);
        let mut receiver = bus.subscribe();

        service
            .handle_event(&DomainEvent::notification("c1", Notification::text("x")))
            .await
            .unwrap();

        assert!(matches!(receiver.try_recv(), Err(EventBusError::Empty)));
    }

    #[tokio::test]
    async fn test_custom_renderer() {
        let bus = EventBus::new(4);
        let repo = Arc::new(InMemoryRepository::from_entities([Container::new(
            "c1",
            ContainerState::Paused,
        )]));
        let renderer = |c: &Container| Notification::text(format!("{}:{}", c.id, c.state));
        let service = SignalingSendAll::new(repo, Arc::new(renderer), Arc::new(bus.clone()));
        let mut receiver = bus.subscribe();

        service
            .handle_event(&DomainEvent::state_changed("c1", ContainerState::Paused))
            .await
            .unwrap();

        match receiver.try_recv().unwrap() {
            DomainEvent::ContainerNotification(n) => assert_eq!(n.notification.body(), "c1:paused"),
            other => panic!("Expected notification event, got {:?}", other),
        }
    }
}
