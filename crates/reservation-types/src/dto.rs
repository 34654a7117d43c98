//! Request and response shapes exchanged at the HTTP boundary

use super::{Contact, Entity, EntityKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A required field was missing, empty or zero
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: cannot be blank")]
pub struct ValidationError {
    pub field: &'static str,
}

/// A stored entity lacks a field the response requires
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} {id} has no {field}")]
pub struct IncompleteEntity {
    pub kind: EntityKind,
    pub id: String,
    pub field: &'static str,
}

/// Create or full-update request; every field is required
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default, alias = "fullname", alias = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: i64,
}

impl ContactRequest {
    /// Presence check, reporting the first blank field
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError { field: "full_name" });
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError { field: "email" });
        }
        if self.phone == 0 {
            return Err(ValidationError { field: "phone" });
        }
        Ok(())
    }
}

impl From<ContactRequest> for Contact {
    fn from(req: ContactRequest) -> Self {
        Contact::new(req.full_name, req.email, req.phone)
    }
}

/// Partial update request; omitted fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
    #[serde(default, alias = "fullname", alias = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<i64>,
}

impl ContactPatch {
    /// Presence check on the fields that were supplied
    pub fn validate(&self) -> Result<(), ValidationError> {
        if matches!(&self.full_name, Some(name) if name.trim().is_empty()) {
            return Err(ValidationError { field: "full_name" });
        }
        if matches!(&self.email, Some(email) if email.trim().is_empty()) {
            return Err(ValidationError { field: "email" });
        }
        if self.phone == Some(0) {
            return Err(ValidationError { field: "phone" });
        }
        Ok(())
    }
}

impl From<ContactPatch> for Contact {
    fn from(patch: ContactPatch) -> Self {
        Contact {
            full_name: patch.full_name,
            email: patch.email,
            phone: patch.phone,
        }
    }
}

/// Entity as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: i64,
}

impl ContactResponse {
    /// Convert a stored entity, refusing ones with unpopulated fields
    pub fn from_entity<E: Entity>(entity: &E) -> Result<Self, IncompleteEntity> {
        let missing = |field| IncompleteEntity {
            kind: E::KIND,
            id: entity.id().to_string(),
            field,
        };
        let contact = entity.contact();

        Ok(Self {
            id: entity.id().to_string(),
            full_name: contact.full_name.clone().ok_or_else(|| missing("full_name"))?,
            email: contact.email.clone().ok_or_else(|| missing("email"))?,
            phone: contact.phone.ok_or_else(|| missing("phone"))?,
        })
    }
}
