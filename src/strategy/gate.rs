use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::error::AppResult;
use crate::exporters::{Exporter, ExporterRegistry};
use crate::models::Notification;

/// Enable/disable switch in front of a resolved exporter.
///
/// The exporter is resolved once, at construction, from an opaque id, so a
/// gate can never hold an invalid exporter reference.
///
/// Forwarding is crate-private: callers outside the crate deliver through
/// [`Strategy::accept`](super::Strategy::accept) and only toggle the gate.
///
/// ```compile_fail
/// use herald_rs::models::Notification;
/// use herald_rs::strategy::Strategy;
///
/// async fn bypass(strategy: &dyn Strategy, notification: &Notification) {
///     let _ = strategy.gate().send(notification).await;
/// }
/// ```
pub struct NotificationGate {
    object_id: String,
    exporter_id: String,
    exporter: Arc<dyn Exporter>,
    enabled: AtomicBool,
}

impl NotificationGate {
    /// Creates an enabled gate for `object_id` delivering through `exporter_id`
    ///
    /// # Errors
    /// `AppError::ExporterNotFound` if `exporter_id` is not registered
    pub fn new(
        object_id: impl Into<String>,
        exporter_id: impl Into<String>,
        registry: &ExporterRegistry,
    ) -> AppResult<Self> {
        let exporter_id = exporter_id.into();
        let exporter = registry.get(&exporter_id)?;

        Ok(Self {
            object_id: object_id.into(),
            exporter_id,
            exporter,
            enabled: AtomicBool::new(true),
        })
    }

    /// Forwards the notification to the exporter when enabled.
    ///
    /// A disabled gate completes successfully without calling the exporter.
    /// An enabled gate returns exactly what the exporter returns.
    pub(crate) async fn send(&self, notification: &Notification) -> AppResult<()> {
        if !self.is_enabled() {
            debug!(
                object_id = %self.object_id,
                exporter_id = %self.exporter_id,
                "Gate disabled, notification dropped"
            );
            return Ok(());
        }

        self.exporter.send(notification).await
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn exporter_id(&self) -> &str {
        &self.exporter_id
    }
}

impl std::fmt::Debug for NotificationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationGate")
            .field("object_id", &self.object_id)
            .field("exporter_id", &self.exporter_id)
            .field("exporter", &self.exporter.name())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
