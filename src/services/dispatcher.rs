//! Runs event handlers as bus subscribers.
//!
//! Each handler gets its own subscription and tokio task. Handler errors are
//! logged and never stop the loop. Shutdown stops handlers one by one in
//! registration order, letting each drain what is already buffered, so
//! events a handler emits while draining still reach the handlers after it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::EventHandler;
use crate::events::{DomainEvent, EventBus, EventBusError, EventReceiver};

struct Subscription {
    name: &'static str,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Subscribes handlers to an event bus and runs them until shutdown
pub struct EventDispatcher {
    bus: EventBus,
    subscriptions: Vec<Subscription>,
}

impl EventDispatcher {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            subscriptions: Vec::new(),
        }
    }

    /// Subscribes the handler and starts its task.
    ///
    /// The subscription is taken before this returns, so every event
    /// published afterwards reaches the handler.
    pub fn spawn(&mut self, handler: Arc<dyn EventHandler>) {
        let name = handler.name();
        let receiver = self.bus.subscribe();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_handler(handler, receiver, cancel.clone()));

        debug!(handler = name, "Handler subscribed");
        self.subscriptions.push(Subscription { name, cancel, task });
    }

    pub fn handler_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Stops all handlers in registration order, each after draining its backlog
    pub async fn shutdown(self) {
        for subscription in self.subscriptions {
            subscription.cancel.cancel();
            if let Err(e) = subscription.task.await {
                warn!(handler = subscription.name, error = %e, "Handler task panicked");
            }
        }
        info!("Event dispatcher stopped");
    }
}

async fn run_handler(
    handler: Arc<dyn EventHandler>,
    mut receiver: EventReceiver,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;

            received = receiver.recv() => match received {
                Ok(event) => handle(handler.as_ref(), event).await,
                Err(EventBusError::Lagged(_)) => continue,
                Err(_) => break,
            },
            _ = cancel.cancelled() => {
                drain(handler.as_ref(), &mut receiver).await;
                break;
            }
        }
    }
    debug!(handler = handler.name(), "Handler stopped");
}

async fn drain(handler: &dyn EventHandler, receiver: &mut EventReceiver) {
    loop {
        match receiver.try_recv() {
            Ok(event) => handle(handler, event).await,
            Err(EventBusError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
}

async fn handle(handler: &dyn EventHandler, event: DomainEvent) {
    if let Err(e) = handler.handle_event(&event).await {
        warn!(
            handler = handler.name(),
            kind = event.kind(),
            object_id = event.object_id(),
            error = %e,
            "Event handler failed"
        );
    }
}
