//! Strategy lifecycle management and event routing.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{info, warn};

use super::EventHandler;
use crate::config::settings::{MonitorConfig, StrategyKind};
use crate::error::{AppError, AppResult};
use crate::events::{ContainerStateChanged, DomainEvent};
use crate::exporters::ExporterRegistry;
use crate::render::Renderer;
use crate::strategy::{SendAllStrategy, Strategy, TransitionStrategy};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StrategyKey {
    object_id: String,
    exporter_id: String,
}

impl StrategyKey {
    fn new(object_id: &str, exporter_id: &str) -> Self {
        Self {
            object_id: object_id.to_string(),
            exporter_id: exporter_id.to_string(),
        }
    }
}

/// Owns one strategy per `(object_id, exporter_id)` pair and hands raw
/// state-change events to the strategies of the affected object.
pub struct MonitoringService {
    registry: Arc<ExporterRegistry>,
    renderer: Arc<dyn Renderer<ContainerStateChanged>>,
    strategies: DashMap<StrategyKey, Arc<dyn Strategy>>,
}

impl MonitoringService {
    pub fn new(
        registry: Arc<ExporterRegistry>,
        renderer: Arc<dyn Renderer<ContainerStateChanged>>,
    ) -> Self {
        Self {
            registry,
            renderer,
            strategies: DashMap::new(),
        }
    }

    /// Builds the strategy described by a monitor configuration without registering it
    pub fn build_strategy(&self, config: &MonitorConfig) -> AppResult<Arc<dyn Strategy>> {
        let strategy: Arc<dyn Strategy> = match config.strategy {
            StrategyKind::SendAll => Arc::new(SendAllStrategy::new(
                config.object_id.as_str(),
                config.exporter.as_str(),
                &self.registry,
                self.renderer.clone(),
            )?),
            StrategyKind::Transition => Arc::new(TransitionStrategy::new(
                config.object_id.as_str(),
                config.exporter.as_str(),
                &self.registry,
                self.renderer.clone(),
                config.states.iter().copied(),
            )?),
        };

        if !config.enabled {
            strategy.disable();
        }
        Ok(strategy)
    }

    /// Starts monitoring an object, replacing any strategy for the same pair
    ///
    /// # Errors
    /// `AppError::ExporterNotFound` if the exporter is unknown; nothing is
    /// registered in that case
    pub fn start_monitoring(&self, config: &MonitorConfig) -> AppResult<Arc<dyn Strategy>> {
        let strategy = self.build_strategy(config)?;
        self.add_strategy(strategy.clone());
        Ok(strategy)
    }

    /// Registers an already built strategy, returning the one it replaced
    pub fn add_strategy(&self, strategy: Arc<dyn Strategy>) -> Option<Arc<dyn Strategy>> {
        let key = StrategyKey::new(strategy.object_id(), strategy.exporter_id());
        info!(
            object_id = %key.object_id,
            exporter_id = %key.exporter_id,
            strategy = strategy.name(),
            enabled = strategy.is_enabled(),
            "Monitoring started"
        );
        self.strategies.insert(key, strategy)
    }

    /// Stops one strategy. Returns whether it existed.
    pub fn stop_monitoring(&self, object_id: &str, exporter_id: &str) -> bool {
        let removed = self
            .strategies
            .remove(&StrategyKey::new(object_id, exporter_id))
            .is_some();
        if removed {
            info!(object_id, exporter_id, "Monitoring stopped");
        }
        removed
    }

    /// Stops every strategy of an object. Returns how many were removed.
    pub fn stop_object(&self, object_id: &str) -> usize {
        let mut removed = 0;
        self.strategies.retain(|key, _| {
            let keep = key.object_id != object_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            info!(object_id, removed, "Monitoring stopped for object");
        }
        removed
    }

    pub fn strategy(&self, object_id: &str, exporter_id: &str) -> Option<Arc<dyn Strategy>> {
        self.strategies
            .get(&StrategyKey::new(object_id, exporter_id))
            .map(|entry| entry.value().clone())
    }

    /// Strategies of an object, ordered by exporter id
    pub fn strategies_for(&self, object_id: &str) -> Vec<Arc<dyn Strategy>> {
        let mut found: Vec<Arc<dyn Strategy>> = self
            .strategies
            .iter()
            .filter(|entry| entry.key().object_id == object_id)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by(|a, b| a.exporter_id().cmp(b.exporter_id()));
        found
    }

    /// Flips the gate of one strategy
    ///
    /// # Errors
    /// `AppError::EntityNotFound` if no such strategy is registered
    pub fn set_enabled(&self, object_id: &str, exporter_id: &str, enabled: bool) -> AppResult<()> {
        let strategy = self.strategy(object_id, exporter_id).ok_or_else(|| {
            AppError::entity_not_found("strategy", format!("{}/{}", object_id, exporter_id))
        })?;

        if enabled {
            strategy.enable();
        } else {
            strategy.disable();
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Gives a state-change event to every strategy of the affected object.
    ///
    /// All strategies see the event even if one fails; the first failure is returned.
    pub async fn dispatch(&self, event: &DomainEvent) -> AppResult<()> {
        let DomainEvent::ContainerStateChanged(changed) = event else {
            return Ok(());
        };

        let mut first_error = None;
        for strategy in self.strategies_for(&changed.container_id) {
            if let Err(e) = strategy.accept(event).await {
                warn!(
                    object_id = %changed.container_id,
                    exporter_id = strategy.exporter_id(),
                    error = %e,
                    "Strategy failed to handle event"
                );
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EventHandler for MonitoringService {
    async fn handle_event(&self, event: &DomainEvent) -> AppResult<()> {
        self.dispatch(event).await
    }

    fn name(&self) -> &'static str {
        "monitoring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporters::testing::RecordingExporter;
    use crate::models::{ContainerState, Notification};
    use crate::render::StateChangeRenderer;

    fn monitor(object_id: &str, exporter: &str, strategy: StrategyKind) -> MonitorConfig {
        MonitorConfig {
            object_id: object_id.to_string(),
            exporter: exporter.to_string(),
            strategy,
            states: vec![],
            enabled: true,
        }
    }

    fn service(exporters: &[(&str, RecordingExporter)]) -> MonitoringService {
        let mut registry = ExporterRegistry::new();
        for (id, exporter) in exporters {
            registry.register(*id, exporter.clone());
        }
        MonitoringService::new(Arc::new(registry), Arc::new(StateChangeRenderer))
    }

    #[tokio::test]
    async fn test_routes_events_to_object_strategies() {
        let a = RecordingExporter::new();
        let b = RecordingExporter::new();
        let service = service(&[("a", a.clone()), ("b", b.clone())]);

        service.start_monitoring(&monitor("c1", "a", StrategyKind::SendAll)).unwrap();
        service.start_monitoring(&monitor("c1", "b", StrategyKind::Transition)).unwrap();
        service.start_monitoring(&monitor("c2", "a", StrategyKind::SendAll)).unwrap();

        service
            .dispatch(&DomainEvent::state_changed("c1", ContainerState::Running))
            .await
            .unwrap();

        assert_eq!(a.calls().len(), 1);
        assert_eq!(b.calls().len(), 1);
        assert_eq!(a.calls()[0].metadata().get("container_id").map(String::as_str), Some("c1"));
    }

    #[test]
    fn test_unknown_exporter_registers_nothing() {
        let service = service(&[]);
        let result = service.start_monitoring(&monitor("c1", "ghost", StrategyKind::SendAll));

        assert!(matches!(result, Err(AppError::ExporterNotFound { ref id }) if id == "ghost"));
        assert!(service.is_empty());
    }

    #[test]
    fn test_one_strategy_per_pair() {
        let service = service(&[("a", RecordingExporter::new())]);

        service.start_monitoring(&monitor("c1", "a", StrategyKind::SendAll)).unwrap();
        service.start_monitoring(&monitor("c1", "a", StrategyKind::Transition)).unwrap();

        assert_eq!(service.len(), 1);
        assert_eq!(service.strategy("c1", "a").unwrap().name(), "transition");
    }

    #[test]
    fn test_stop_monitoring() {
        let service = service(&[("a", RecordingExporter::new()), ("b", RecordingExporter::new())]);
        service.start_monitoring(&monitor("c1", "a", StrategyKind::SendAll)).unwrap();
        service.start_monitoring(&monitor("c1", "b", StrategyKind::SendAll)).unwrap();
        service.start_monitoring(&monitor("c2", "a", StrategyKind::SendAll)).unwrap();

        assert!(service.stop_monitoring("c2", "a"));
        assert!(!service.stop_monitoring("c2", "a"));
        assert_eq!(service.stop_object("c1"), 2);
        assert!(service.is_empty());
    }

    #[test]
    fn test_stop_object_counts_only_its_removals_under_concurrent_inserts() {
        let service = service(&[("a", RecordingExporter::new()), ("b", RecordingExporter::new())]);

        for round in 0..50 {
            service.start_monitoring(&monitor("c1", "a", StrategyKind::SendAll)).unwrap();
            service.start_monitoring(&monitor("c1", "b", StrategyKind::SendAll)).unwrap();

            let removed = std::thread::scope(|scope| {
                scope.spawn(|| {
                    for i in 0..20 {
                        let id = format!("other-{}-{}", round, i);
                        service.start_monitoring(&monitor(&id, "a", StrategyKind::SendAll)).unwrap();
                    }
                });
                scope.spawn(|| service.stop_object("c1")).join().unwrap()
            });

            assert_eq!(removed, 2);
            assert!(service.strategies_for("c1").is_empty());
        }
        assert_eq!(service.len(), 50 * 20);
    }

    #[tokio::test]
    async fn test_disabled_monitor_starts_gated() {
        let a = RecordingExporter::new();
        let service = service(&[("a", a.clone())]);
        let mut config = monitor("c1", "a", StrategyKind::SendAll);
        config.enabled = false;

        let strategy = service.start_monitoring(&config).unwrap();
        assert!(!strategy.is_enabled());

        service
            .dispatch(&DomainEvent::state_changed("c1", ContainerState::Dead))
            .await
            .unwrap();
        assert!(a.calls().is_empty());

        service.set_enabled("c1", "a", true).unwrap();
        service
            .dispatch(&DomainEvent::state_changed("c1", ContainerState::Dead))
            .await
            .unwrap();
        assert_eq!(a.calls().len(), 1);
    }

    #[test]
    fn test_set_enabled_unknown_strategy() {
        let service = service(&[]);
        let err = service.set_enabled("c1", "a", false).unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound { ref entity, .. } if entity == "strategy"));
    }

    #[tokio::test]
    async fn test_failure_does_not_starve_other_strategies() {
        let broken = RecordingExporter::failing("offline");
        let healthy = RecordingExporter::new();
        let service = service(&[("a", broken.clone()), ("b", healthy.clone())]);
        service.start_monitoring(&monitor("c1", "a", StrategyKind::SendAll)).unwrap();
        service.start_monitoring(&monitor("c1", "b", StrategyKind::SendAll)).unwrap();

        let result = service
            .dispatch(&DomainEvent::state_changed("c1", ContainerState::Exited))
            .await;

        assert!(matches!(result, Err(AppError::Delivery { .. })));
        assert_eq!(broken.calls().len(), 1);
        assert_eq!(healthy.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_notification_events_are_not_routed() {
        let a = RecordingExporter::new();
        let service = service(&[("a", a.clone())]);
        service.start_monitoring(&monitor("c1", "a", StrategyKind::SendAll)).unwrap();

        service
            .handle_event(&DomainEvent::notification("c1", Notification::text("x")))
            .await
            .unwrap();
        assert!(a.calls().is_empty());
    }
}
