//! Error types for the directory core.

use thiserror::Error;

use roster_commons::CommonError;
use roster_session::DenyReason;

/// Main error type for directory operations.
///
/// Every variant is local: nothing here crashes the process. Recoverable
/// variants (`Validation`, `NotFound`, `Duplicate`, `Conflict`) expect the
/// caller to correct input or refresh its snapshot and retry; the core
/// itself never retries.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    Authorization(DenyReason),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Cascade failure: {0}")]
    Cascade(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl DirectoryError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        DirectoryError::Validation(msg.into())
    }

    /// Create a not-found error for a principal id
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        DirectoryError::NotFound(id.into())
    }

    /// Create a duplicate error
    pub fn duplicate<S: Into<String>>(msg: S) -> Self {
        DirectoryError::Duplicate(msg.into())
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(msg: S) -> Self {
        DirectoryError::Conflict(msg.into())
    }

    /// Create a repository error
    pub fn repository<S: Into<String>>(msg: S) -> Self {
        DirectoryError::Repository(msg.into())
    }

    /// Deny reason when this is an authorization error.
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            DirectoryError::Authorization(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<DenyReason> for DirectoryError {
    fn from(reason: DenyReason) -> Self {
        DirectoryError::Authorization(reason)
    }
}

impl From<CommonError> for DirectoryError {
    fn from(err: CommonError) -> Self {
        DirectoryError::Validation(err.to_string())
    }
}

/// Result type alias using DirectoryError.
pub type Result<T> = std::result::Result<T, DirectoryError>;
