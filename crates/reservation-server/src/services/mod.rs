//! Business logic services

pub mod reservation;

pub use reservation::{HasEntityService, ReservationService};
