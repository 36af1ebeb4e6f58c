//! Repository and entity trait definitions.

use std::fmt::Display;

use crate::error::AppResult;

/// Any object with a stable identity that can be stored in a repository.
///
/// The `Clone` bound is the isolation capability: a repository returns
/// `entity.clone()` from every read, so `Clone` must duplicate every
/// mutable field reachable from the entity.
pub trait DomainEntity: Clone + Send + Sync + 'static {
    type Id: Display + ?Sized;

    /// Entity kind used in error messages (e.g. "container")
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    /// Storage key for this entity
    fn key(&self) -> String {
        self.id().to_string()
    }
}

/// Keyed store of domain entities.
///
/// Implementations must never return a live alias of a stored value.
pub trait Repository<T: DomainEntity>: Send + Sync {
    /// Checks whether an entity with the given id is stored
    fn has(&self, id: &str) -> bool;

    /// Returns an isolated copy of the stored entity
    ///
    /// # Errors
    /// `AppError::EntityNotFound` if nothing is stored under `id`
    fn get(&self, id: &str) -> AppResult<T>;

    /// Stores the entity, replacing any previous value with the same id
    fn save(&self, entity: T);

    /// Removes the entity; deleting a missing id is not an error
    fn delete(&self, id: &str);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
