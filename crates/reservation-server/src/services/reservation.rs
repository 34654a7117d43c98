//! Reservation service: candidates and recruiters

use reservation_core::{
    Candidate, Contact, ContactPatch, ContactRequest, ContactResponse, Entity, EntityStore,
    Recruiter, ReservationError, Result,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Adapts one kind's store to request/response DTOs
pub struct EntityService<E: Entity> {
    store: Arc<dyn EntityStore<E>>,
}

impl<E: Entity> EntityService<E> {
    pub fn new(store: Arc<dyn EntityStore<E>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<ContactResponse>> {
        let entities = self
            .store
            .list()
            .await
            .map_err(|e| self.observe("list", None, e))?;

        entities
            .iter()
            .map(|entity| {
                ContactResponse::from_entity(entity)
                    .map_err(|e| self.observe("list", Some(entity.id()), e.into()))
            })
            .collect()
    }

    pub async fn add(&self, req: ContactRequest) -> Result<ContactResponse> {
        req.validate()
            .map_err(|e| self.observe("add", None, e.into()))?;

        let contact = Contact::from(req);
        let id = self
            .store
            .add(E::draft(contact.clone()))
            .await
            .map_err(|e| self.observe("add", None, e))?;
        info!(kind = %E::KIND, id = %id, "Created entity");

        let entity = E::from_parts(id, contact);
        ContactResponse::from_entity(&entity)
            .map_err(|e| self.observe("add", Some(entity.id()), e.into()))
    }

    pub async fn get(&self, id: &str) -> Result<ContactResponse> {
        let entity = self
            .store
            .get(id)
            .await
            .map_err(|e| self.observe("get", Some(id), e))?;

        ContactResponse::from_entity(&entity).map_err(|e| self.observe("get", Some(id), e.into()))
    }

    /// Replace all three fields
    pub async fn update(&self, id: &str, req: ContactRequest) -> Result<()> {
        req.validate()
            .map_err(|e| self.observe("update", Some(id), e.into()))?;

        self.store
            .update(id, E::draft(req.into()))
            .await
            .map_err(|e| self.observe("update", Some(id), e))
    }

    /// Change only the supplied fields
    pub async fn patch(&self, id: &str, patch: ContactPatch) -> Result<()> {
        patch
            .validate()
            .map_err(|e| self.observe("patch", Some(id), e.into()))?;

        self.store
            .update(id, E::draft(patch.into()))
            .await
            .map_err(|e| self.observe("patch", Some(id), e))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store
            .delete(id)
            .await
            .map_err(|e| self.observe("delete", Some(id), e))?;
        info!(kind = %E::KIND, id = %id, "Deleted entity");

        Ok(())
    }

    /// Log a failed operation at a level matching who caused it
    fn observe(
        &self,
        op: &'static str,
        id: Option<&str>,
        err: ReservationError,
    ) -> ReservationError {
        let id = id.unwrap_or("-");
        match &err {
            ReservationError::NotFound { .. } => {
                debug!(kind = %E::KIND, op, id, "{}", err)
            }
            ReservationError::Validation(_) | ReservationError::NoFieldsToUpdate => {
                warn!(kind = %E::KIND, op, id, error = %err, "Rejected request")
            }
            ReservationError::Internal(_) => {
                error!(kind = %E::KIND, op, id, error = %err, "Operation failed")
            }
        }
        err
    }
}

/// Holds one [`EntityService`] per kind
pub struct ReservationService {
    candidates: EntityService<Candidate>,
    recruiters: EntityService<Recruiter>,
}

impl ReservationService {
    pub fn new(
        candidates: Arc<dyn EntityStore<Candidate>>,
        recruiters: Arc<dyn EntityStore<Recruiter>>,
    ) -> Self {
        Self {
            candidates: EntityService::new(candidates),
            recruiters: EntityService::new(recruiters),
        }
    }

    /// The service for kind `E`
    pub fn of<E>(&self) -> &EntityService<E>
    where
        E: Entity,
        Self: HasEntityService<E>,
    {
        HasEntityService::<E>::entity_service(self)
    }
}

pub trait HasEntityService<E: Entity> {
    fn entity_service(&self) -> &EntityService<E>;
}

impl HasEntityService<Candidate> for ReservationService {
    fn entity_service(&self) -> &EntityService<Candidate> {
        &self.candidates
    }
}

impl HasEntityService<Recruiter> for ReservationService {
    fn entity_service(&self) -> &EntityService<Recruiter> {
        &self.recruiters
    }
}
