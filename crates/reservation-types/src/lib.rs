//! Reservation Types - Pure data definitions
//!
//! Entities, request/response shapes and presence validation shared by the
//! store, service and transport layers. No async runtime or storage
//! dependencies live here.

pub mod contact;
pub mod dto;

pub use contact::*;
pub use dto::*;

use serde::{Deserialize, Serialize};

/// The kinds of entity managed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Candidate,
    Recruiter,
}

impl EntityKind {
    /// Relational table backing this kind
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Candidate => "candidates",
            EntityKind::Recruiter => "recruiters",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Candidate => write!(f, "candidate"),
            EntityKind::Recruiter => write!(f, "recruiter"),
        }
    }
}

/// A stored record of one kind.
///
/// Both kinds share the [`Contact`] shape, so stores are written once and are
/// generic over this trait.
pub trait Entity: Clone + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    const KIND: EntityKind;

    fn from_parts(id: String, contact: Contact) -> Self;

    fn id(&self) -> &str;

    fn contact(&self) -> &Contact;

    fn contact_mut(&mut self) -> &mut Contact;

    /// Build an id-less entity from contact fields, ready for `add`
    fn draft(contact: Contact) -> Self {
        Self::from_parts(String::new(), contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(EntityKind::Candidate.to_string(), "candidate");
        assert_eq!(EntityKind::Recruiter.table(), "recruiters");
        assert_eq!(
            serde_json::to_string(&EntityKind::Recruiter).unwrap(),
            "\"recruiter\""
        );
    }
}
