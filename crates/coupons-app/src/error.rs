// Rust guideline compliant 2026-10-18

//! Error handling for Coupons application services.

use coupons_core::Error as CoreError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A record failed validation.
    ValidationError,
    /// The requested record was not found.
    NotFound,
    /// A transition guard rejected the request.
    GuardViolation,
    /// The persistence or blob store failed.
    UpstreamError,
    /// The provided identifier matched multiple records.
    AmbiguousId,
    /// The request included invalid inputs.
    InvalidInput,
    /// The repository has not been initialized.
    RepoNotInitialized,
}

impl ErrorCode {
    /// Returns the snake_case name of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::NotFound => "not_found",
            ErrorCode::GuardViolation => "guard_violation",
            ErrorCode::UpstreamError => "upstream_error",
            ErrorCode::AmbiguousId => "ambiguous_id",
            ErrorCode::InvalidInput => "invalid_input",
            ErrorCode::RepoNotInitialized => "repo_not_initialized",
        }
    }
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository is missing or not initialized.
    #[error("Coupons repository not initialized at {path}. Run 'cpn init' first.")]
    RepoNotInitialized {
        /// Path where `.coupons` was expected.
        path: PathBuf,
    },

    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::RepoNotInitialized { .. } => ErrorCode::RepoNotInitialized,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Io(_) => ErrorCode::UpstreamError,
            AppError::Core(core) => match core {
                CoreError::Validation(_) | CoreError::DuplicateId(_) => {
                    ErrorCode::ValidationError
                }
                CoreError::NotFound(_) => ErrorCode::NotFound,
                CoreError::GuardViolation(_) => ErrorCode::GuardViolation,
                CoreError::AmbiguousId(_, _) => ErrorCode::AmbiguousId,
                CoreError::Io(_) | CoreError::Json(_) | CoreError::Upstream(_) => {
                    ErrorCode::UpstreamError
                }
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::RepoNotInitialized { path } => Some(serde_json::json!({
                "path": path,
            })),
            AppError::Core(CoreError::AmbiguousId(partial, matches)) => Some(serde_json::json!({
                "partial": partial,
                "matches": matches,
            })),
            _ => None,
        }
    }
}
