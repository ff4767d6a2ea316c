//! Blob store contract and bundled implementations.
//!
//! The directory core treats attachment payloads as opaque bytes behind a
//! [`BlobRef`]. Production object stores are external collaborators; this
//! module ships an in-memory store for tests and a local-filesystem store
//! for single-node embedding.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{FilestoreError, Result};
use roster_commons::BlobRef;

/// Abstraction over opaque byte storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a payload and return its reference.
    async fn store(&self, data: Bytes, mime_type: &str) -> Result<BlobRef>;

    /// Fetch a payload by reference.
    async fn retrieve(&self, blob_ref: &BlobRef) -> Result<Bytes>;

    /// Delete a payload. Deleting an unknown reference is an error.
    async fn delete(&self, blob_ref: &BlobRef) -> Result<()>;
}

/// In-memory blob store for tests and ephemeral embedding.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<BlobRef, Bytes>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store(&self, data: Bytes, _mime_type: &str) -> Result<BlobRef> {
        let blob_ref = BlobRef::generate();
        self.blobs.insert(blob_ref.clone(), data);
        Ok(blob_ref)
    }

    async fn retrieve(&self, blob_ref: &BlobRef) -> Result<Bytes> {
        self.blobs
            .get(blob_ref)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| FilestoreError::blob(format!("Blob '{}' not found", blob_ref)))
    }

    async fn delete(&self, blob_ref: &BlobRef) -> Result<()> {
        self.blobs
            .remove(blob_ref)
            .map(|_| ())
            .ok_or_else(|| FilestoreError::blob(format!("Blob '{}' not found", blob_ref)))
    }
}

/// Filesystem-backed blob store keeping one file per blob under a base
/// directory. References are NanoIDs, so they are always path-safe.
pub struct LocalBlobStore {
    base_dir: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at `base_dir`, creating the directory if
    /// needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn path_for(&self, blob_ref: &BlobRef) -> PathBuf {
        self.base_dir.join(blob_ref.as_str())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, data: Bytes, _mime_type: &str) -> Result<BlobRef> {
        let blob_ref = BlobRef::generate();
        fs::write(self.path_for(&blob_ref), &data)?;
        Ok(blob_ref)
    }

    async fn retrieve(&self, blob_ref: &BlobRef) -> Result<Bytes> {
        let path = self.path_for(blob_ref);
        if !path.exists() {
            return Err(FilestoreError::blob(format!("Blob '{}' not found", blob_ref)));
        }
        Ok(Bytes::from(fs::read(path)?))
    }

    async fn delete(&self, blob_ref: &BlobRef) -> Result<()> {
        let path = self.path_for(blob_ref);
        if !path.exists() {
            return Err(FilestoreError::blob(format!("Blob '{}' not found", blob_ref)));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryBlobStore::new();
        let blob_ref = store
            .store(Bytes::from_static(b"payload"), "text/plain")
            .await
            .unwrap();
        assert_eq!(
            store.retrieve(&blob_ref).await.unwrap(),
            Bytes::from_static(b"payload")
        );
        store.delete(&blob_ref).await.unwrap();
        assert!(store.retrieve(&blob_ref).await.is_err());
        assert!(store.delete(&blob_ref).await.is_err());
    }

    #[tokio::test]
    async fn test_local_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().join("blobs")).unwrap();
        let blob_ref = store
            .store(Bytes::from_static(b"on disk"), "application/octet-stream")
            .await
            .unwrap();
        assert_eq!(
            store.retrieve(&blob_ref).await.unwrap(),
            Bytes::from_static(b"on disk")
        );
        store.delete(&blob_ref).await.unwrap();
        assert!(store.retrieve(&blob_ref).await.is_err());
    }
}
