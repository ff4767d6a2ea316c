//! Attachment registry: owner-keyed metadata over the blob store.

use bytes::Bytes;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

use crate::blob_store::BlobStore;
use crate::config::AttachmentLimits;
use crate::error::{FilestoreError, Result};
use roster_commons::{AttachmentRecord, PrincipalId};
use roster_session::{authorize, Action, Session, Target};

/// Per-principal attachment index over an injected blob store.
///
/// Records are kept in upload order per owner. Isolation is structural:
/// every lookup is keyed by the owning principal id, so records can never
/// leak across owners. Upload and delete consult the authorization engine
/// first; the duplicate-name policy is reject, not silently version.
pub struct AttachmentRegistry {
    blobs: Arc<dyn BlobStore>,
    index: DashMap<PrincipalId, Vec<AttachmentRecord>>,
    limits: AttachmentLimits,
}

impl AttachmentRegistry {
    pub fn new(blobs: Arc<dyn BlobStore>, limits: AttachmentLimits) -> Self {
        Self {
            blobs,
            index: DashMap::new(),
            limits,
        }
    }

    /// Registry with default limits.
    pub fn with_defaults(blobs: Arc<dyn BlobStore>) -> Self {
        Self::new(blobs, AttachmentLimits::default())
    }

    fn validate_file_name(file_name: &str) -> Result<()> {
        if file_name.is_empty() {
            return Err(FilestoreError::InvalidFileName(
                "file name cannot be empty".to_string(),
            ));
        }
        if file_name.contains("..")
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name.contains('\0')
        {
            return Err(FilestoreError::InvalidFileName(format!(
                "file name '{}' contains path characters",
                file_name
            )));
        }
        Ok(())
    }

    /// Store a new attachment for `owner`.
    ///
    /// Fails with `DuplicateAttachment` if the owner already has a file
    /// with this name. Size and MIME limits are checked before the blob
    /// store is touched.
    pub async fn upload(
        &self,
        actor: &Session,
        owner: &PrincipalId,
        file_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> Result<AttachmentRecord> {
        authorize(actor, Action::UploadAttachment, Target::owner(owner))
            .into_result()
            .map_err(FilestoreError::Authorization)?;

        Self::validate_file_name(file_name)?;

        if data.len() > self.limits.max_file_size {
            return Err(FilestoreError::TooLarge {
                file_name: file_name.to_string(),
                size: data.len(),
                max: self.limits.max_file_size,
            });
        }
        if !self.limits.mime_allowed(mime_type) {
            return Err(FilestoreError::MimeNotAllowed {
                mime_type: mime_type.to_string(),
                file_name: file_name.to_string(),
            });
        }
        if self.contains(owner, file_name) {
            return Err(FilestoreError::duplicate(owner.as_str(), file_name));
        }

        let size = data.len();
        let blob_ref = self.blobs.store(data, mime_type).await?;
        let record = AttachmentRecord::new(
            owner.clone(),
            file_name,
            mime_type,
            blob_ref.clone(),
            size,
            Utc::now().timestamp_millis(),
        );

        {
            let mut entry = self.index.entry(owner.clone()).or_default();
            // Re-check under the entry lock: a concurrent upload of the
            // same name may have won between the pre-check and the blob
            // write.
            if entry.iter().any(|r| r.file_name == file_name) {
                drop(entry);
                if let Err(e) = self.blobs.delete(&blob_ref).await {
                    log::warn!("Failed to roll back orphaned blob {}: {}", blob_ref, e);
                }
                return Err(FilestoreError::duplicate(owner.as_str(), file_name));
            }
            entry.push(record.clone());
        }

        log::info!(
            "Stored attachment: owner={}, file={}, size={}, mime={}",
            owner,
            file_name,
            size,
            mime_type
        );
        Ok(record)
    }

    /// List `owner`'s attachments in upload order.
    pub fn list(&self, owner: &PrincipalId) -> Vec<AttachmentRecord> {
        self.index
            .get(owner)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Whether `owner` has an attachment with this name.
    pub fn contains(&self, owner: &PrincipalId, file_name: &str) -> bool {
        self.index
            .get(owner)
            .map(|entry| entry.iter().any(|r| r.file_name == file_name))
            .unwrap_or(false)
    }

    /// Fetch an attachment payload. Lookups are keyed by owner, so a
    /// caller can only ever reach its supplied owner's files.
    pub async fn retrieve(&self, owner: &PrincipalId, file_name: &str) -> Result<Bytes> {
        let record = self
            .index
            .get(owner)
            .and_then(|entry| entry.iter().find(|r| r.file_name == file_name).cloned())
            .ok_or_else(|| FilestoreError::not_found(owner.as_str(), file_name))?;
        self.blobs.retrieve(&record.blob_ref).await
    }

    /// Delete one attachment: blob first, then metadata.
    pub async fn delete(
        &self,
        actor: &Session,
        owner: &PrincipalId,
        file_name: &str,
    ) -> Result<()> {
        authorize(actor, Action::DeleteAttachment, Target::owner(owner))
            .into_result()
            .map_err(FilestoreError::Authorization)?;

        let record = self
            .index
            .get(owner)
            .and_then(|entry| entry.iter().find(|r| r.file_name == file_name).cloned())
            .ok_or_else(|| FilestoreError::not_found(owner.as_str(), file_name))?;

        self.blobs.delete(&record.blob_ref).await?;

        if let Some(mut entry) = self.index.get_mut(owner) {
            entry.retain(|r| r.file_name != file_name);
        }

        log::info!("Deleted attachment: owner={}, file={}", owner, file_name);
        Ok(())
    }

    /// Remove every attachment owned by `owner`.
    ///
    /// Cascade hook for principal deletion. Blobs are deleted one by one;
    /// on the first failure the remaining metadata (including the failed
    /// record) is kept so the cascade can be retried, and the error is
    /// returned. Returns the number of attachments removed.
    pub async fn remove_owner(&self, owner: &PrincipalId) -> Result<usize> {
        let records = match self.index.remove(owner) {
            Some((_, records)) => records,
            None => return Ok(0),
        };

        let total = records.len();
        for (pos, record) in records.iter().enumerate() {
            if let Err(e) = self.blobs.delete(&record.blob_ref).await {
                // Keep what is left so a retry can finish the job.
                self.index.insert(owner.clone(), records[pos..].to_vec());
                log::warn!(
                    "Attachment cascade for owner={} failed at {}: {}",
                    owner,
                    record.file_name,
                    e
                );
                return Err(e);
            }
        }

        if total > 0 {
            log::info!("Removed {} attachment(s) for owner={}", total, owner);
        }
        Ok(total)
    }
}
