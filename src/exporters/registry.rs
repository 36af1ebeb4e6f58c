use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::{ConsoleExporter, Exporter, LogExporter};
use crate::config::settings::ExportersConfig;
use crate::error::{AppError, AppResult};

/// Well-known id of the console exporter
pub const CONSOLE_EXPORTER_ID: &str = "console";

/// Well-known id of the log exporter
pub const LOG_EXPORTER_ID: &str = "log";

/// Registry mapping exporter ids to delivery channels.
///
/// Populated once at startup and shared read-only (behind `Arc`) with
/// whatever builds strategies and forwarders.
#[derive(Clone, Default)]
pub struct ExporterRegistry {
    exporters: HashMap<String, Arc<dyn Exporter>>,
}

impl ExporterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry holding the built-in exporters enabled in configuration
    pub fn from_settings(config: &ExportersConfig) -> Self {
        let mut registry = Self::new();
        if config.console.enabled {
            registry.register(CONSOLE_EXPORTER_ID, ConsoleExporter::new(&config.console));
        }
        if config.log.enabled {
            registry.register(LOG_EXPORTER_ID, LogExporter);
        }
        registry
    }

    /// Register an exporter under the given id, replacing any previous one
    pub fn register<E>(&mut self, id: impl Into<String>, exporter: E) -> &mut Self
    where
        E: Exporter + 'static,
    {
        self.register_arc(id, Arc::new(exporter))
    }

    /// Register an already shared exporter
    pub fn register_arc(&mut self, id: impl Into<String>, exporter: Arc<dyn Exporter>) -> &mut Self {
        let id = id.into();
        debug!(exporter_id = %id, exporter = exporter.name(), "Registering exporter");
        self.exporters.insert(id, exporter);
        self
    }

    /// Resolve an exporter by id
    ///
    /// # Errors
    /// `AppError::ExporterNotFound` for unknown ids
    pub fn get(&self, id: &str) -> AppResult<Arc<dyn Exporter>> {
        self.exporters
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::ExporterNotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.exporters.contains_key(id)
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.exporters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.exporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exporters.is_empty()
    }
}
