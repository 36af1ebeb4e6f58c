//! Application wiring.
//!
//! Builds the event bus, repository, exporter registry and services from
//! settings, and starts them as bus subscribers.

use std::sync::Arc;

use tracing::info;

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::events::{DomainEvent, EventBus, EventPublisher};
use crate::exporters::ExporterRegistry;
use crate::models::Container;
use crate::render::StateChangeRenderer;
use crate::repositories::{ContainerRepository, Repository};
use crate::services::{EventDispatcher, MonitoringService, NotificationForwarder, SignalingSendAll};

/// Shared services and resources of a running instance.
///
/// Cloning is cheap; every member is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub bus: EventBus,
    pub containers: Arc<ContainerRepository>,
    pub exporters: Arc<ExporterRegistry>,
    pub monitoring: Arc<MonitoringService>,
    /// Present when signaling is enabled
    pub signaling: Option<Arc<SignalingSendAll>>,
    /// Delivers signaling output; present when signaling is enabled
    pub forwarder: Option<Arc<NotificationForwarder>>,
}

impl AppState {
    /// Wires the application with the built-in exporters enabled in settings
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        Self::with_registry(settings, ExporterRegistry::from_settings(&settings.exporters))
    }

    /// Wires the application around an already populated exporter registry
    ///
    /// # Errors
    /// `AppError::ExporterNotFound` if signaling or a monitor names an exporter
    /// missing from the registry
    pub fn with_registry(settings: &Settings, registry: ExporterRegistry) -> AppResult<Self> {
        let bus = EventBus::new(settings.event_bus.capacity);
        let containers = Arc::new(ContainerRepository::new());
        let exporters = Arc::new(registry);
        let renderer = Arc::new(StateChangeRenderer);

        let (signaling, forwarder) = if settings.signaling.enabled {
            let forwarder = NotificationForwarder::new(settings.signaling.exporter.as_str(), &exporters)?;
            let signaling = SignalingSendAll::new(
                containers.clone(),
                renderer.clone(),
                Arc::new(bus.clone()),
            );
            (Some(Arc::new(signaling)), Some(Arc::new(forwarder)))
        } else {
            (None, None)
        };

        let monitoring = Arc::new(MonitoringService::new(exporters.clone(), renderer));
        for monitor in &settings.monitors {
            monitoring.start_monitoring(monitor)?;
        }

        info!(
            exporters = ?exporters.ids(),
            monitors = monitoring.len(),
            signaling = settings.signaling.enabled,
            "Application wired"
        );

        Ok(Self {
            bus,
            containers,
            exporters,
            monitoring,
            signaling,
            forwarder,
        })
    }

    /// Subscribes all services to the bus.
    ///
    /// The forwarder is registered after signaling so a shutdown drain
    /// still delivers notifications signaling emits while draining.
    pub fn start(&self) -> EventDispatcher {
        let mut dispatcher = EventDispatcher::new(self.bus.clone());
        if let Some(ref signaling) = self.signaling {
            dispatcher.spawn(signaling.clone());
        }
        dispatcher.spawn(self.monitoring.clone());
        if let Some(ref forwarder) = self.forwarder {
            dispatcher.spawn(forwarder.clone());
        }
        dispatcher
    }

    /// Records a container snapshot and announces its state
    pub fn observe(&self, container: Container) {
        let event = DomainEvent::state_changed(container.id.as_str(), container.state);
        self.containers.save(container);
        self.bus.emit_event(event);
    }
}
