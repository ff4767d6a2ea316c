//! Error types for authentication and session resolution.

use thiserror::Error;

use roster_directory::DirectoryError;

/// Errors raised at the authentication boundary.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Wrong email/password. The message is deliberately uniform so
    /// callers cannot distinguish "unknown email" from "wrong password".
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Identity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication succeeded but the directory has no matching record.
    /// Recoverable-but-reportable; fatal for the session being resolved.
    #[error("Directory inconsistency: {0}")]
    DirectoryInconsistency(String),

    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}

impl AuthError {
    /// Create an invalid-credentials error with the uniform message.
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials("Invalid email or password".to_string())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        AuthError::Validation(msg.into())
    }

    /// Create a provider error
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        AuthError::Provider(msg.into())
    }
}

/// Result type alias using AuthError.
pub type AuthResult<T> = std::result::Result<T, AuthError>;
