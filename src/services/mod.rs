//! Service layer bridging domain events to notifications.
//!
//! Services subscribe to the event bus through the [`EventDispatcher`] and
//! coordinate between the repository, renderers, strategies and exporters.

mod dispatcher;
mod forwarder;
mod monitoring;
mod signaling;

pub use dispatcher::EventDispatcher;
pub use forwarder::NotificationForwarder;
pub use monitoring::MonitoringService;
pub use signaling::SignalingSendAll;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::events::DomainEvent;

/// Subscriber to domain events
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handles one event. Events the handler is not interested in are `Ok(())`.
    async fn handle_event(&self, event: &DomainEvent) -> AppResult<()>;

    /// Handler name for logging
    fn name(&self) -> &'static str;
}
