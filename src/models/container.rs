//! Container aggregate as observed by upstream monitoring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::repositories::DomainEntity;

/// Lifecycle state of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Stopped,
    Exited,
    Dead,
}

impl ContainerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Stopped => "stopped",
            ContainerState::Exited => "exited",
            ContainerState::Dead => "dead",
        }
    }
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a monitored container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub state: ContainerState,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl Container {
    pub fn new(id: impl Into<String>, state: ContainerState) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            image: String::new(),
            state,
            labels: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Name for display, falling back to the id for unnamed containers
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl DomainEntity for Container {
    type Id = String;

    const KIND: &'static str = "container";

    fn id(&self) -> &String {
        &self.id
    }
}
