//! Notification value object handed to exporters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Rendered message destined for an exporter.
///
/// Immutable once built: fields are only reachable through getters, and
/// the builder methods consume the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    title: Option<String>,
    body: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl Notification {
    /// Creates a plain text notification
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}
