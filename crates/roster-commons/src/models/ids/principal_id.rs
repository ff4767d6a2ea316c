//! Type-safe wrapper for principal identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type-safe wrapper for principal identifiers.
///
/// Ensures principal ids cannot be accidentally used where blob refs or
/// credential refs are expected. Ids are opaque, stable, and assigned by
/// the directory repository at creation time — never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrincipalId(String);

/// Error type for PrincipalId validation failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalIdValidationError(pub String);

impl fmt::Display for PrincipalIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PrincipalIdValidationError {}

impl PrincipalId {
    /// Creates a new PrincipalId from a string.
    ///
    /// # Panics
    /// Panics if the id contains path traversal characters. Use `try_new()`
    /// for fallible creation.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self::try_new(id).expect("PrincipalId contains invalid characters")
    }

    /// Creates a new PrincipalId, returning an error if validation fails.
    ///
    /// # Security
    /// Validates that the id does not contain path traversal characters:
    /// - `..` (parent directory)
    /// - `/` or `\` (directory separators)
    /// - Null bytes (`\0`)
    ///
    /// This prevents path traversal when principal ids are used to key
    /// attachment storage paths.
    pub fn try_new(id: impl Into<String>) -> Result<Self, PrincipalIdValidationError> {
        let id = id.into();
        Self::validate_id(&id)?;
        Ok(Self(id))
    }

    fn validate_id(id: &str) -> Result<(), PrincipalIdValidationError> {
        if id.contains("..") {
            return Err(PrincipalIdValidationError(
                "Principal id cannot contain '..' (path traversal)".to_string(),
            ));
        }
        if id.contains('/') || id.contains('\\') {
            return Err(PrincipalIdValidationError(
                "Principal id cannot contain directory separators".to_string(),
            ));
        }
        if id.contains('\0') {
            return Err(PrincipalIdValidationError(
                "Principal id cannot contain null bytes".to_string(),
            ));
        }
        if id.is_empty() {
            return Err(PrincipalIdValidationError(
                "Principal id cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Generates a new unique PrincipalId using NanoID (21 URL-safe
    /// characters, default alphabet `A-Za-z0-9_-`).
    #[inline]
    pub fn generate() -> Self {
        Self(nanoid::nanoid!())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PrincipalId {
    /// Converts a String into PrincipalId.
    ///
    /// # Panics
    /// Panics if the string contains path traversal characters.
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PrincipalId {
    /// Converts a &str into PrincipalId.
    ///
    /// # Panics
    /// Panics if the string contains path traversal characters.
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for PrincipalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
