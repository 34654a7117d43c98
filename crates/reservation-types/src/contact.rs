//! Entity types

use super::{Entity, EntityKind};
use serde::{Deserialize, Serialize};

/// Contact fields shared by every entity kind.
///
/// `None` means "not provided", which lets an update tell an omitted field
/// apart from one that is being set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<i64>,
}

impl Contact {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>, phone: i64) -> Self {
        Self {
            full_name: Some(full_name.into()),
            email: Some(email.into()),
            phone: Some(phone),
        }
    }

    /// True when no field is provided
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.phone.is_none()
    }

    /// Overwrite the fields that are present in `changes`, keep the rest
    pub fn merge(&mut self, changes: Contact) {
        if let Some(full_name) = changes.full_name {
            self.full_name = Some(full_name);
        }
        if let Some(email) = changes.email {
            self.email = Some(email);
        }
        if let Some(phone) = changes.phone {
            self.phone = Some(phone);
        }
    }
}

/// A job candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(flatten)]
    pub contact: Contact,
}

/// A recruiter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recruiter {
    pub id: String,
    #[serde(flatten)]
    pub contact: Contact,
}

macro_rules! impl_entity {
    ($ty:ident, $kind:expr) => {
        impl Entity for $ty {
            const KIND: EntityKind = $kind;

            fn from_parts(id: String, contact: Contact) -> Self {
                Self { id, contact }
            }

            fn id(&self) -> &str {
                &self.id
            }

            fn contact(&self) -> &Contact {
                &self.contact
            }

            fn contact_mut(&mut self) -> &mut Contact {
                &mut self.contact
            }
        }
    };
}

impl_entity!(Candidate, EntityKind::Candidate);
impl_entity!(Recruiter, EntityKind::Recruiter);
