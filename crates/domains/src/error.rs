//! # DomainError
//!
//! Centralized error handling for the Mushaira workflow core.
//! Every failure here is recoverable at the call site: the services
//! report the specific kind and perform no partial mutation.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Bad credentials at login.
    #[error("invalid email or password")]
    Authentication,

    /// Resource already exists (e.g. duplicate email at signup).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A non-admin (or unauthenticated) actor attempted a gated transition.
    #[error("unauthorized: {0}")]
    Authorization(String),

    /// Malformed input (empty payload, out-of-range rating, bad inspiration reference).
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found (e.g. Submission, OpeningVerse).
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// Infrastructure failure surfaced by an adapter.
    #[error("storage error: {0}")]
    Storage(String),
}

/// A specialized Result type for Mushaira domain logic.
pub type Result<T> = std::result::Result<T, DomainError>;
