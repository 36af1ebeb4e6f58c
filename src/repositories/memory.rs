//! In-memory repository implementation backed by a concurrent map.

use dashmap::DashMap;

use crate::error::{AppError, AppResult};
use crate::repositories::{DomainEntity, Repository};

/// In-memory storage for any kind of entity.
///
/// `get` clones the stored value; `save` takes ownership of the entity, so
/// the caller keeps no handle through which it could change what is stored.
pub struct InMemoryRepository<T: DomainEntity> {
    store: DashMap<String, T>,
}

impl<T: DomainEntity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Creates a repository pre-filled with the given entities
    pub fn from_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let repo = Self::new();
        for entity in entities {
            repo.save(entity);
        }
        repo
    }
}

impl<T: DomainEntity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DomainEntity> Repository<T> for InMemoryRepository<T> {
    fn has(&self, id: &str) -> bool {
        self.store.contains_key(id)
    }

    fn get(&self, id: &str) -> AppResult<T> {
        self.store
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::entity_not_found(T::KIND, id))
    }

    fn save(&self, entity: T) {
        self.store.insert(entity.key(), entity);
    }

    fn delete(&self, id: &str) {
        self.store.remove(id);
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}
