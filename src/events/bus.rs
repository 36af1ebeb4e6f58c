//! Event bus built on tokio broadcast channels.
//!
//! Publishing never waits on subscribers: a slow subscriber lags and loses
//! the oldest buffered events instead of blocking the publisher.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::DomainEvent;

/// Default number of buffered events per subscriber
pub const DEFAULT_CAPACITY: usize = 1024;

/// Upper bound on buffered events per subscriber; the ring buffer is
/// allocated up front
pub const MAX_CAPACITY: usize = 1 << 20;

/// Fire-and-forget distribution of domain events
pub trait EventPublisher: Send + Sync {
    fn emit_event(&self, event: DomainEvent);
}

/// Event bus for publishing and subscribing to domain events
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    ///
    /// The capacity is clamped to `1..=MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_CAPACITY));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Subscribe to all domain events published from now on
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.sender.subscribe(),
        }
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventPublisher for EventBus {
    fn emit_event(&self, event: DomainEvent) {
        debug!(kind = event.kind(), object_id = event.object_id(), "Publishing event");

        // send() only fails when nobody is subscribed
        if self.sender.send(event).is_err() {
            debug!("No subscribers listening to event");
        }
    }
}

/// Receiver for all domain events
pub struct EventReceiver {
    receiver: broadcast::Receiver<DomainEvent>,
}

impl EventReceiver {
    /// Receive the next event, waiting until one is available
    pub async fn recv(&mut self) -> Result<DomainEvent, EventBusError> {
        self.receiver.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => EventBusError::Closed,
            broadcast::error::RecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        })
    }

    /// Try to receive an event without waiting
    pub fn try_recv(&mut self) -> Result<DomainEvent, EventBusError> {
        self.receiver.try_recv().map_err(|e| match e {
            broadcast::error::TryRecvError::Empty => EventBusError::Empty,
            broadcast::error::TryRecvError::Closed => EventBusError::Closed,
            broadcast::error::TryRecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        })
    }
}

/// Errors that can occur when receiving events
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event bus is closed")]
    Closed,

    #[error("No events available")]
    Empty,

    #[error("Receiver lagged by {0} events (events were dropped)")]
    Lagged(u64),
}
