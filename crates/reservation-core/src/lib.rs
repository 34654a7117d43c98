//! Reservation Core Library
//!
//! Error taxonomy and the storage port shared by every backend.

// Re-export pure types from reservation-types
pub use reservation_types::*;

pub mod error;
pub mod ports;

pub use error::{ReservationError, Result};
pub use ports::EntityStore;
