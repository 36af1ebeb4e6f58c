//! Domain models for monitored objects and outbound notifications.

mod container;
mod notification;

pub use container::{Container, ContainerState};
pub use notification::Notification;
