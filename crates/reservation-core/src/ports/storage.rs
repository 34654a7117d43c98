//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use reservation_types::Entity;

/// Persistence contract for one entity kind.
///
/// Implementations report a missing id as
/// [`ReservationError::NotFound`](crate::ReservationError::NotFound),
/// whatever the backend.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Every stored entity, unpaginated
    async fn list(&self) -> Result<Vec<E>>;

    /// Persist `entity` under a freshly assigned id and return that id.
    /// Any id already set on `entity` is ignored.
    async fn add(&self, entity: E) -> Result<String>;

    async fn get(&self, id: &str) -> Result<E>;

    /// Apply the fields present in `entity` to the stored one.
    /// Fails with `NoFieldsToUpdate` before touching storage when none are.
    async fn update(&self, id: &str, entity: E) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}
