//! In-memory entity store using DashMap

use async_trait::async_trait;
use dashmap::DashMap;
use reservation_core::{Entity, EntityStore, ReservationError, Result};
use tracing::debug;

/// Entity store backed by a concurrent map owned by this instance.
///
/// Ids are random v4 UUIDs. Writes to one row are mutually exclusive through
/// the map's entry guards.
pub struct MemoryStore<E: Entity> {
    data: DashMap<String, E>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore<E> {
    async fn list(&self) -> Result<Vec<E>> {
        Ok(self.data.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn add(&self, entity: E) -> Result<String> {
        let id = Self::generate_id();
        let stored = E::from_parts(id.clone(), entity.contact().clone());
        self.data.insert(id.clone(), stored);

        debug!("Added {} {}", E::KIND, id);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<E> {
        self.data
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ReservationError::not_found(E::KIND, id))
    }

    async fn update(&self, id: &str, entity: E) -> Result<()> {
        let changes = entity.contact().clone();
        if changes.is_empty() {
            return Err(ReservationError::NoFieldsToUpdate);
        }

        let mut stored = self
            .data
            .get_mut(id)
            .ok_or_else(|| ReservationError::not_found(E::KIND, id))?;
        stored.contact_mut().merge(changes);

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.data
            .remove(id)
            .map(|_| debug!("Deleted {} {}", E::KIND, id))
            .ok_or_else(|| ReservationError::not_found(E::KIND, id))
    }
}
