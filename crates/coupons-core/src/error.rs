// Rust guideline compliant 2026-10-18

//! Error types for the Coupons core library.

use thiserror::Error;

/// Result type alias for Coupons operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Coupons operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record failed validation at the write boundary.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Discount code not found.
    #[error("Discount code not found: {0}")]
    NotFound(String),

    /// A transition guard rejected the requested change.
    #[error("Transition rejected: {0}")]
    GuardViolation(String),

    /// A record with the same ID is already stored.
    #[error("Duplicate ID: {0}")]
    DuplicateId(String),

    /// Ambiguous partial ID.
    #[error("Ambiguous ID: {0} matches {1:?}")]
    AmbiguousId(String, Vec<String>),

    /// Failure reported by a persistence or blob store collaborator.
    #[error("Upstream store error: {0}")]
    Upstream(String),
}

impl Error {
    /// Returns true for failures that originate in a storage collaborator
    /// rather than in the caller's request.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Json(_) | Error::Upstream(_))
    }
}
