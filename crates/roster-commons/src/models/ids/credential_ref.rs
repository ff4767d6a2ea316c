//! Opaque handle to an external identity record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to a record held by the external identity provider.
///
/// The directory core never inspects the contents; it only compares and
/// stores the handle. Raw secrets never pass through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CredentialRef(String);

impl CredentialRef {
    pub fn new(r: impl Into<String>) -> Self {
        Self(r.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CredentialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CredentialRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CredentialRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CredentialRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
