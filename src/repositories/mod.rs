//! Repository layer for domain entities.
//!
//! Entities live in memory only. Every read hands out an owned copy, so a
//! caller mutating what it got back can never reach the stored value or
//! another caller's copy.

mod memory;
mod traits;

pub use memory::InMemoryRepository;
pub use traits::{DomainEntity, Repository};

use crate::models::Container;

/// In-memory store of container snapshots
pub type ContainerRepository = InMemoryRepository<Container>;
