//! Attachment limit configuration.

use serde::{Deserialize, Serialize};

/// Default maximum attachment size in bytes (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Upload restrictions applied before any blob store write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentLimits {
    /// Maximum payload size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// Allowed MIME types (empty = allow all). Entries ending in `/*`
    /// match the whole top-level type, e.g. `image/*`.
    #[serde(default)]
    pub allowed_mime_types: Vec<String>,
}

fn default_max_file_size() -> usize {
    DEFAULT_MAX_FILE_SIZE
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: Vec::new(),
        }
    }
}

impl AttachmentLimits {
    /// Check a MIME type against the allow-list.
    pub fn mime_allowed(&self, mime_type: &str) -> bool {
        if self.allowed_mime_types.is_empty() {
            return true;
        }
        self.allowed_mime_types.iter().any(|allowed| {
            if let Some(prefix) = allowed.strip_suffix("/*") {
                mime_type.starts_with(prefix)
            } else {
                mime_type == allowed
            }
        })
    }
}
