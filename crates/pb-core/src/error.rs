//! # AppError
//!
//! Centralized error handling for the Pinboard ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all pb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Board document failed structural validation (bad PUT body)
    #[error("validation error: {0}")]
    Validation(String),

    /// Storage backend failure (DB down, file unwritable)
    #[error("storage error: {0}")]
    Storage(String),

    /// Transport failure between the session and the persistence API
    #[error("transport error: {0}")]
    Transport(String),

    /// Resource not found
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),
}

/// A specialized Result type for Pinboard logic.
pub type Result<T> = std::result::Result<T, AppError>;
