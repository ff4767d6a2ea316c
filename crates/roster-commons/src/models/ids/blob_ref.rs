//! Opaque handle into the external blob store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to bytes held by the external blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobRef(String);

impl BlobRef {
    pub fn new(r: impl Into<String>) -> Self {
        Self(r.into())
    }

    /// Mints a fresh reference using NanoID. Blob store implementations
    /// that generate their own keys can ignore this.
    #[inline]
    pub fn generate() -> Self {
        Self(nanoid::nanoid!())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BlobRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BlobRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for BlobRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
