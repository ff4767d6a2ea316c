//! Shared error types for Roster.
//!
//! This module provides the common error type used by model validation in
//! roster-commons. It is hand-rolled (no thiserror) so the commons crate
//! stays dependency-light at the bottom of the workspace graph.

use std::fmt;

/// Common error type for model-level validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// Invalid input provided to a constructor or validator
    InvalidInput(String),

    /// A required field was empty or missing
    MissingField(String),
}

impl CommonError {
    /// Creates an InvalidInput error with a message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates a MissingField error naming the field.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommonError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CommonError::MissingField(field) => write!(f, "Missing required field: {}", field),
        }
    }
}

impl std::error::Error for CommonError {}

/// Result type alias using CommonError.
pub type Result<T> = std::result::Result<T, CommonError>;
