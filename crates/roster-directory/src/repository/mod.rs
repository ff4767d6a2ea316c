//! Directory persistence contract.

mod memory;

pub use memory::MemoryDirectoryRepository;

use async_trait::async_trait;

use crate::error::Result;
use roster_commons::{CredentialRef, Principal, PrincipalDraft, PrincipalId, PrincipalPatch};

/// Abstraction over durable principal storage.
///
/// The directory core only consumes this narrow surface; wire formats,
/// indexing, and replication are the implementation's business. Two
/// contract points matter to the core:
///
/// - `put` assigns the id (never reused) and enforces email uniqueness.
/// - `update_if_version` is conditional on the caller's `expected_version`
///   so concurrent modification surfaces as `Conflict` instead of a silent
///   overwrite.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Fetch one principal by id.
    async fn get(&self, id: &PrincipalId) -> Result<Option<Principal>>;

    /// Fetch one principal by its external identity handle. Used by the
    /// session resolver to map authentication results onto the directory.
    async fn find_by_credential(&self, credential_ref: &CredentialRef)
        -> Result<Option<Principal>>;

    /// Return the full directory snapshot in stable order.
    async fn list(&self) -> Result<Vec<Principal>>;

    /// Persist a new principal. Assigns a fresh id; fails with `Duplicate`
    /// if a record with the same email already exists.
    async fn put(&self, draft: PrincipalDraft) -> Result<Principal>;

    /// Apply a patch if the stored version still matches
    /// `expected_version`; fails with `Conflict` otherwise, `NotFound` when
    /// the id is absent. Returns the updated record.
    async fn update_if_version(
        &self,
        id: &PrincipalId,
        patch: &PrincipalPatch,
        expected_version: u64,
    ) -> Result<Principal>;

    /// Remove a principal. Fails with `NotFound` when the id is absent.
    async fn delete(&self, id: &PrincipalId) -> Result<()>;
}
