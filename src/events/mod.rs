//! Domain events and the in-process event bus.

mod bus;
mod types;

pub use bus::{
    DEFAULT_CAPACITY, EventBus, EventBusError, EventPublisher, EventReceiver, MAX_CAPACITY,
};
pub use types::{ContainerNotification, ContainerStateChanged, DomainEvent};
