//! In-memory reference implementation of the directory repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::error::{DirectoryError, Result};
use crate::repository::DirectoryRepository;
use roster_commons::{CredentialRef, Principal, PrincipalDraft, PrincipalId, PrincipalPatch};

/// DashMap-backed repository for tests and single-process embedding.
///
/// Ids are minted as NanoIDs and never reused; `list()` returns records in
/// insertion order; email uniqueness is compared case-insensitively; every
/// successful write bumps the record's `version`.
#[derive(Default)]
pub struct MemoryDirectoryRepository {
    records: DashMap<PrincipalId, Principal>,
    // Insertion order for stable snapshots.
    order: Mutex<Vec<PrincipalId>>,
}

impl MemoryDirectoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn email_taken(&self, email: &str) -> bool {
        let needle = email.to_lowercase();
        self.records
            .iter()
            .any(|entry| entry.value().email.to_lowercase() == needle)
    }
}

#[async_trait]
impl DirectoryRepository for MemoryDirectoryRepository {
    async fn get(&self, id: &PrincipalId) -> Result<Option<Principal>> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_credential(
        &self,
        credential_ref: &CredentialRef,
    ) -> Result<Option<Principal>> {
        Ok(self
            .records
            .iter()
            .find(|entry| &entry.value().credential_ref == credential_ref)
            .map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Principal>> {
        let order = self.order.lock();
        Ok(order
            .iter()
            .filter_map(|id| self.records.get(id).map(|entry| entry.value().clone()))
            .collect())
    }

    async fn put(&self, draft: PrincipalDraft) -> Result<Principal> {
        if self.email_taken(&draft.email) {
            return Err(DirectoryError::duplicate(format!(
                "email {}",
                draft.email
            )));
        }

        let id = PrincipalId::generate();
        let record = Principal::from_draft(id.clone(), draft, Utc::now().timestamp_millis());
        self.records.insert(id.clone(), record.clone());
        self.order.lock().push(id);
        Ok(record)
    }

    async fn update_if_version(
        &self,
        id: &PrincipalId,
        patch: &PrincipalPatch,
        expected_version: u64,
    ) -> Result<Principal> {
        let mut entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| DirectoryError::not_found(id.as_str()))?;

        let record = entry.value_mut();
        if record.version != expected_version {
            return Err(DirectoryError::conflict(format!(
                "version {} expected, found {}",
                expected_version, record.version
            )));
        }

        patch.apply_to(record);
        record.version += 1;
        record.updated_at = Utc::now().timestamp_millis();
        Ok(record.clone())
    }

    async fn delete(&self, id: &PrincipalId) -> Result<()> {
        self.records
            .remove(id)
            .ok_or_else(|| DirectoryError::not_found(id.as_str()))?;
        self.order.lock().retain(|known| known != id);
        Ok(())
    }
}
