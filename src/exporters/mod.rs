//! Notification exporters with a pluggable delivery channel.
//!
//! The core trait `Exporter` is the only thing the dispatch core knows
//! about delivery. Exporters are looked up by id in an `ExporterRegistry`
//! built once at startup.

mod channel;
mod console;
mod exporter;
mod log;
pub mod registry;

pub use channel::ChannelExporter;
pub use console::ConsoleExporter;
pub use exporter::Exporter;
pub use log::LogExporter;
pub use registry::ExporterRegistry;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::Exporter;
    use crate::error::{AppError, AppResult};
    use crate::models::Notification;

    /// Exporter stub that records every call and can be told to fail
    #[derive(Clone, Default)]
    pub struct RecordingExporter {
        calls: Arc<Mutex<Vec<Notification>>>,
        fail_with: Option<String>,
    }

    impl RecordingExporter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing(message: &str) -> Self {
            Self {
                calls: Arc::default(),
                fail_with: Some(message.to_string()),
            }
        }

        pub fn calls(&self) -> Vec<Notification> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Exporter for RecordingExporter {
        async fn send(&self, notification: &Notification) -> AppResult<()> {
            self.calls.lock().unwrap().push(notification.clone());
            match &self.fail_with {
                Some(message) => Err(AppError::delivery(self.name(), anyhow::anyhow!(message.clone()))),
                None => Ok(()),
            }
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }
}
