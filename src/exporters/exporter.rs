//! Core exporter trait.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Notification;

/// Delivery channel for notifications (console, log, in-process channel, ...)
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All exporters must be Send + Sync for use in async contexts.
#[async_trait]
pub trait Exporter: Send + Sync {
    /// Delivers a notification
    ///
    /// # Errors
    /// Whatever the channel fails with, usually `AppError::Delivery`. The
    /// dispatch core passes it through unchanged.
    async fn send(&self, notification: &Notification) -> AppResult<()>;

    /// Returns the exporter name for logging/debugging
    fn name(&self) -> &'static str;
}
