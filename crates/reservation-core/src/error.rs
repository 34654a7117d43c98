//! Error types for the reservation system

use reservation_types::{EntityKind, IncompleteEntity, ValidationError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReservationError>;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("no fields to update")]
    NoFieldsToUpdate,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl ReservationError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        ReservationError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReservationError::NotFound { .. })
    }

    /// Stable snake_case name, used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            ReservationError::NotFound { .. } => "not_found",
            ReservationError::NoFieldsToUpdate => "no_fields_to_update",
            ReservationError::Validation(_) => "validation",
            ReservationError::Internal(_) => "internal",
        }
    }
}

impl From<ValidationError> for ReservationError {
    fn from(e: ValidationError) -> Self {
        ReservationError::Validation(e.to_string())
    }
}

impl From<IncompleteEntity> for ReservationError {
    fn from(e: IncompleteEntity) -> Self {
        ReservationError::Internal(e.to_string())
    }
}
