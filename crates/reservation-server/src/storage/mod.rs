//! Storage layer
//!
//! Uses SQLite (embedded) for the relational backend.
//! Uses DashMap (in-memory) for the memory backend.

pub mod db;
pub mod memory;
pub mod update;

pub use db::{Database, SqlStore};
pub use memory::MemoryStore;

use crate::config::{StoreMode, StoreSettings};
use anyhow::{Context, Result};
use reservation_core::{Candidate, EntityStore, Recruiter};
use std::sync::Arc;
use tracing::info;

/// One store per entity kind, chosen once at startup
pub struct Stores {
    pub candidates: Arc<dyn EntityStore<Candidate>>,
    pub recruiters: Arc<dyn EntityStore<Recruiter>>,
    database: Option<Database>,
}

impl Stores {
    pub fn memory() -> Self {
        Self {
            candidates: Arc::new(MemoryStore::<Candidate>::new()),
            recruiters: Arc::new(MemoryStore::<Recruiter>::new()),
            database: None,
        }
    }

    pub fn sql(database: Database) -> Self {
        Self {
            candidates: Arc::new(SqlStore::<Candidate>::new(database.pool())),
            recruiters: Arc::new(SqlStore::<Recruiter>::new(database.pool())),
            database: Some(database),
        }
    }

    pub async fn open(settings: &StoreSettings) -> Result<Self> {
        match settings.mode {
            StoreMode::Memory => {
                info!("Using in-memory stores");
                Ok(Self::memory())
            }
            StoreMode::Sql => {
                let dsn = settings
                    .dsn
                    .as_deref()
                    .context("store.dsn is required when store.mode is sql")?;
                let database = Database::connect(dsn, settings.max_connections).await?;
                info!("Using SQL stores");
                Ok(Self::sql(database))
            }
        }
    }

    pub async fn close(&self) {
        if let Some(ref database) = self.database {
            database.close().await;
        }
    }
}

/// Behaviour every [`EntityStore`] must share, run against each backend
#[cfg(test)]
pub(crate) mod conformance {
    use reservation_core::{Contact, Entity, EntityStore, ReservationError};

    pub async fn run_all<E: Entity>(store: &dyn EntityStore<E>) {
        round_trip(store).await;
        unknown_id_is_not_found(store).await;
        empty_update_is_rejected(store).await;
        single_field_update_keeps_others(store).await;
        list_returns_every_added(store).await;
        delete_is_final(store).await;
        jane_doe_scenario(store).await;
    }

    fn jane() -> Contact {
        Contact::new("Jane Doe", "jane@x.com", 5551234)
    }

    async fn round_trip<E: Entity>(store: &dyn EntityStore<E>) {
        let id = store.add(E::draft(jane())).await.unwrap();
        let stored = store.get(&id).await.unwrap();

        assert_eq!(stored, E::from_parts(id, jane()));
    }

    async fn unknown_id_is_not_found<E: Entity>(store: &dyn EntityStore<E>) {
        for id in ["999999", "never-issued"] {
            assert!(store.get(id).await.unwrap_err().is_not_found());
            assert!(store
                .update(id, E::draft(jane()))
                .await
                .unwrap_err()
                .is_not_found());
            assert!(store.delete(id).await.unwrap_err().is_not_found());
        }
    }

    async fn empty_update_is_rejected<E: Entity>(store: &dyn EntityStore<E>) {
        let id = store.add(E::draft(jane())).await.unwrap();

        let err = store
            .update(&id, E::draft(Contact::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::NoFieldsToUpdate));
        assert_eq!(store.get(&id).await.unwrap().contact(), &jane());
    }

    async fn single_field_update_keeps_others<E: Entity>(store: &dyn EntityStore<E>) {
        let id = store.add(E::draft(jane())).await.unwrap();

        store
            .update(
                &id,
                E::draft(Contact {
                    email: Some("jane2@x.com".to_string()),
                    ..Default::default()
                }),
            )
            .await
            .unwrap();

        let stored = store.get(&id).await.unwrap();
        assert_eq!(stored.contact().email.as_deref(), Some("jane2@x.com"));
        assert_eq!(stored.contact().full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(stored.contact().phone, Some(5551234));
    }

    async fn list_returns_every_added<E: Entity>(store: &dyn EntityStore<E>) {
        let before = store.list().await.unwrap().len();

        let mut ids = Vec::new();
        for i in 1..=5 {
            let contact = Contact::new(format!("Person {}", i), format!("p{}@x.com", i), i);
            ids.push(store.add(E::draft(contact)).await.unwrap());
        }

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), before + 5);
        for id in &ids {
            assert!(listed.iter().any(|e| e.id() == id));
            assert_eq!(store.get(id).await.unwrap().id(), id);
        }
    }

    async fn delete_is_final<E: Entity>(store: &dyn EntityStore<E>) {
        let id = store.add(E::draft(jane())).await.unwrap();

        store.delete(&id).await.unwrap();
        assert!(store.get(&id).await.unwrap_err().is_not_found());
        assert!(store.delete(&id).await.unwrap_err().is_not_found());
    }

    async fn jane_doe_scenario<E: Entity>(store: &dyn EntityStore<E>) {
        let id = store.add(E::draft(jane())).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap().contact(), &jane());

        store
            .update(
                &id,
                E::draft(Contact {
                    email: Some("jane2@x.com".to_string()),
                    ..Default::default()
                }),
            )
            .await
            .unwrap();
        let updated = store.get(&id).await.unwrap();
        assert_eq!(updated.contact().email.as_deref(), Some("jane2@x.com"));
        assert_eq!(updated.contact().full_name.as_deref(), Some("Jane Doe"));

        store.delete(&id).await.unwrap();
        assert!(store.get(&id).await.unwrap_err().is_not_found());
    }
}
