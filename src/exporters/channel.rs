//! In-process exporter forwarding notifications into a tokio channel.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::Exporter;
use crate::error::{AppError, AppResult};
use crate::models::Notification;

/// Hands every notification to the receiving half of an unbounded channel.
///
/// Useful for embedding the dispatch core in another service, and for
/// observing deliveries in tests.
#[derive(Debug, Clone)]
pub struct ChannelExporter {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelExporter {
    pub fn new(sender: mpsc::UnboundedSender<Notification>) -> Self {
        Self { sender }
    }

    /// Creates an exporter together with the receiver it feeds
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

#[async_trait]
impl Exporter for ChannelExporter {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        self.sender
            .send(notification.clone())
            .map_err(|_| AppError::delivery(self.name(), anyhow::anyhow!("receiver dropped")))
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}
