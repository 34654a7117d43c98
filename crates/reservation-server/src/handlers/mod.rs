//! HTTP handlers

pub mod entities;
pub mod error;
pub mod health;

pub use error::ApiError;
pub use health::health;
