//! Attachment metadata entry.

use serde::{Deserialize, Serialize};

use crate::models::{BlobRef, PrincipalId};

/// Metadata for one file attached to a principal.
///
/// Attachments are strictly owned: no record may be read, listed, or
/// deleted by resolving a different owner id. `file_name` is unique within
/// the owner's set. The payload itself lives behind `blob_ref` in the
/// external blob store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    pub owner_id: PrincipalId,
    pub file_name: String,
    pub mime_type: String,
    pub blob_ref: BlobRef,
    /// Payload size in bytes at upload time.
    pub size: usize,
    /// Unix timestamp in milliseconds of the upload.
    pub uploaded_at: i64,
}

impl AttachmentRecord {
    pub fn new(
        owner_id: PrincipalId,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        blob_ref: BlobRef,
        size: usize,
        uploaded_at: i64,
    ) -> Self {
        Self {
            owner_id,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            blob_ref,
            size,
            uploaded_at,
        }
    }
}
