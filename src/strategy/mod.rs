//! Notification strategies.
//!
//! A strategy is the per-object policy deciding whether an incoming event
//! becomes an outbound notification. Every strategy owns a
//! [`NotificationGate`], the shared enable/disable switch and exporter
//! forwarding primitive; the strategy itself only supplies `accept`.
//! The gate's `send` is crate-private, so notifications leave a strategy
//! only through its `accept` policy.
//!
//! # Example Implementation
//! ```ignore
//! struct EveryEvent {
//!     gate: NotificationGate,
//! }
//!
//! #[async_trait]
//! impl Strategy for EveryEvent {
//!     fn gate(&self) -> &NotificationGate {
//!         &self.gate
//!     }
//!
//!     async fn accept(&self, event: &DomainEvent) -> AppResult<()> {
//!         self.gate.send(&Notification::text(event.kind())).await
//!     }
//! }
//! ```

mod gate;
mod send_all;
mod transition;

pub use gate::NotificationGate;
pub use send_all::SendAllStrategy;
pub use transition::TransitionStrategy;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::events::DomainEvent;

/// Policy turning raw events about one object into notifications
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Gate shared by every strategy: enabled flag plus resolved exporter
    fn gate(&self) -> &NotificationGate;

    /// Accepts an event about the monitored object.
    ///
    /// Ignoring an event is a valid response and returns `Ok(())`.
    /// Delivery failures from the exporter are returned unchanged.
    async fn accept(&self, event: &DomainEvent) -> AppResult<()>;

    /// Short policy name for logging
    fn name(&self) -> &'static str;

    fn object_id(&self) -> &str {
        self.gate().object_id()
    }

    fn exporter_id(&self) -> &str {
        self.gate().exporter_id()
    }

    fn is_enabled(&self) -> bool {
        self.gate().is_enabled()
    }

    fn enable(&self) {
        self.gate().enable()
    }

    fn disable(&self) {
        self.gate().disable()
    }
}
