//! Directory mutation pipeline.
//!
//! Orchestrates create/edit/delete/bulk-delete against the repository.
//! Every operation follows the same discipline: consult the authorization
//! engine, validate input, then persist — in that order, so nothing
//! touches storage after a denial.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{DirectoryError, Result};
use crate::export::ExportSink;
use crate::repository::DirectoryRepository;
use roster_commons::{
    MutationOutcome, Principal, PrincipalDraft, PrincipalId, PrincipalPatch,
};
use roster_filestore::AttachmentRegistry;
use roster_session::{authorize, Action, DenyReason, Session, Target};

/// The directory mutation pipeline.
///
/// Holds no mutable state of its own; the repository and attachment
/// registry are injected, so parallel instances never interfere. Each
/// public operation is a single request/response unit — no background
/// tasks, no automatic retries.
pub struct DirectoryService {
    repo: Arc<dyn DirectoryRepository>,
    attachments: Arc<AttachmentRegistry>,
}

impl DirectoryService {
    pub fn new(repo: Arc<dyn DirectoryRepository>, attachments: Arc<AttachmentRegistry>) -> Self {
        Self { repo, attachments }
    }

    /// The attachment registry this pipeline cascades into.
    pub fn attachments(&self) -> &Arc<AttachmentRegistry> {
        &self.attachments
    }

    /// Create a new principal.
    ///
    /// Required fields (`name`, `email`, `credential_ref`) are validated
    /// before the repository is touched; the role defaults to USER. A
    /// repository-reported email collision surfaces as `Duplicate`.
    pub async fn create(&self, actor: &Session, draft: PrincipalDraft) -> Result<Principal> {
        authorize(actor, Action::Create, Target::Directory).into_result()?;
        draft.validate()?;

        let stored = self.repo.put(draft).await?;
        log::info!(
            "Created principal: id={}, email={}, role={}",
            stored.id,
            stored.email,
            stored.role
        );
        Ok(stored)
    }

    /// Fetch one record. Admins read anything; a USER only its own record.
    pub async fn get(&self, actor: &Session, id: &PrincipalId) -> Result<Principal> {
        authorize(actor, Action::Read, Target::owner(id)).into_result()?;
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DirectoryError::not_found(id.as_str()))
    }

    /// Full directory snapshot, admin tier only.
    pub async fn list(&self, actor: &Session) -> Result<Vec<Principal>> {
        authorize(actor, Action::Read, Target::Directory).into_result()?;
        self.repo.list().await
    }

    /// Patch an existing record.
    ///
    /// Authorization is checked against the *current* (pre-patch) role of
    /// the target, so a patch can never demote a protected role and then
    /// apply further changes in the same call. The patch itself may not
    /// grant a protected role. Persistence goes through the conditional
    /// update, so a concurrent modification surfaces as `Conflict`.
    pub async fn edit(
        &self,
        actor: &Session,
        id: &PrincipalId,
        patch: PrincipalPatch,
    ) -> Result<Principal> {
        let current = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| DirectoryError::not_found(id.as_str()))?;

        authorize(actor, Action::Edit, Target::record(id, current.role)).into_result()?;
        patch.validate()?;

        let updated = self
            .repo
            .update_if_version(id, &patch, current.version)
            .await?;
        log::info!("Updated principal: id={}, version={}", updated.id, updated.version);
        Ok(updated)
    }

    /// Delete one principal, cascading its attachments first.
    ///
    /// Attachment cleanup and record removal are one logical unit: if the
    /// cleanup fails, the principal is left intact and the whole delete
    /// reports `Cascade`.
    pub async fn delete(&self, actor: &Session, id: &PrincipalId) -> Result<()> {
        self.delete_gated(actor, id, Action::Delete).await
    }

    async fn delete_gated(&self, actor: &Session, id: &PrincipalId, action: Action) -> Result<()> {
        let current = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| DirectoryError::not_found(id.as_str()))?;

        authorize(actor, action, Target::record(id, current.role)).into_result()?;

        self.attachments
            .remove_owner(id)
            .await
            .map_err(|e| DirectoryError::Cascade(e.to_string()))?;

        self.repo.delete(id).await?;
        log::info!("Deleted principal: id={}, email={}", id, current.email);
        Ok(())
    }

    /// Best-effort batch delete.
    ///
    /// Each id is evaluated independently; one item's failure never aborts
    /// the rest. The outcome sequence preserves request order, contains
    /// one entry per distinct id (the first occurrence wins), and reports
    /// protected targets as `skipped_protected` without attempting them.
    /// This method never returns an error — failures are encoded per item.
    pub async fn bulk_delete(
        &self,
        actor: &Session,
        ids: &[PrincipalId],
    ) -> Vec<MutationOutcome> {
        let mut outcomes = Vec::with_capacity(ids.len());
        let mut seen: HashSet<&PrincipalId> = HashSet::with_capacity(ids.len());

        for id in ids {
            if !seen.insert(id) {
                continue;
            }
            let outcome = match self.delete_gated(actor, id, Action::BulkDelete).await {
                Ok(()) => MutationOutcome::applied(id.clone()),
                Err(DirectoryError::Authorization(DenyReason::ProtectedAccount)) => {
                    MutationOutcome::skipped_protected(id.clone())
                }
                Err(e) => MutationOutcome::failed(id.clone(), e.to_string()),
            };
            outcomes.push(outcome);
        }

        let applied = outcomes.iter().filter(|o| o.is_applied()).count();
        log::info!(
            "Bulk delete: {} requested, {} distinct, {} applied",
            ids.len(),
            outcomes.len(),
            applied
        );
        outcomes
    }

    /// Hand the full directory to an export sink.
    ///
    /// Returns the number of rows supplied. The sink owns all formatting.
    pub async fn export(&self, actor: &Session, sink: &mut dyn ExportSink) -> Result<usize> {
        authorize(actor, Action::Export, Target::Directory).into_result()?;
        let rows = self.repo.list().await?;
        sink.write_rows(&rows).map_err(DirectoryError::Export)?;
        log::info!("Exported {} principal(s)", rows.len());
        Ok(rows.len())
    }

    /// Hand a single record to an export sink.
    pub async fn export_one(
        &self,
        actor: &Session,
        id: &PrincipalId,
        sink: &mut dyn ExportSink,
    ) -> Result<()> {
        authorize(actor, Action::Export, Target::Directory).into_result()?;
        let row = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| DirectoryError::not_found(id.as_str()))?;
        sink.write_rows(std::slice::from_ref(&row))
            .map_err(DirectoryError::Export)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryDirectoryRepository;
    use roster_commons::Role;
    use roster_filestore::MemoryBlobStore;
    use roster_session::DenyReason;

    fn service() -> DirectoryService {
        let repo = Arc::new(MemoryDirectoryRepository::new());
        let attachments =
            Arc::new(AttachmentRegistry::with_defaults(Arc::new(MemoryBlobStore::new())));
        DirectoryService::new(repo, attachments)
    }

    fn actor(role: Role) -> Session {
        Session::with_timestamp(PrincipalId::new("actor"), role, 0)
    }

    fn draft(name: &str, email: &str) -> PrincipalDraft {
        PrincipalDraft::new(name, email, format!("cred_{}", name))
    }

    #[tokio::test]
    async fn test_create_defaults_role_to_user() {
        let svc = service();
        let stored = svc
            .create(&actor(Role::Admin), draft("A", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(stored.role, Role::User);
        assert!(!stored.id.as_str().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_admin_tier() {
        let svc = service();
        let err = svc
            .create(&actor(Role::User), draft("A", "a@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::InsufficientRole));
    }

    #[tokio::test]
    async fn test_create_validates_before_repository() {
        let svc = service();
        let mut bad = draft("A", "a@x.com");
        bad.email = "".to_string();
        let err = svc.create(&actor(Role::Admin), bad).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
        // Nothing was persisted.
        assert!(svc.list(&actor(Role::Admin)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let svc = service();
        svc.create(&actor(Role::Admin), draft("A", "a@x.com")).await.unwrap();
        let err = svc
            .create(&actor(Role::Admin), draft("B", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_edit_denied_on_protected_target_even_for_super_admin() {
        let svc = service();
        let admin_record = svc
            .create(
                &actor(Role::SuperAdmin),
                draft("Admin", "admin@x.com").with_role(Role::Admin),
            )
            .await
            .unwrap();

        let patch = PrincipalPatch {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let err = svc
            .edit(&actor(Role::SuperAdmin), &admin_record.id, patch)
            .await
            .unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::ProtectedAccount));
    }

    #[tokio::test]
    async fn test_edit_requires_super_admin_on_unprotected() {
        let svc = service();
        let user = svc
            .create(&actor(Role::Admin), draft("U", "u@x.com"))
            .await
            .unwrap();

        let patch = PrincipalPatch {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        let err = svc
            .edit(&actor(Role::Admin), &user.id, patch.clone())
            .await
            .unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::InsufficientRole));

        let updated = svc
            .edit(&actor(Role::SuperAdmin), &user.id, patch)
            .await
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("New Name"));
        assert_eq!(updated.version, user.version + 1);
    }

    #[tokio::test]
    async fn test_edit_rejects_protected_role_in_patch() {
        let svc = service();
        let user = svc
            .create(&actor(Role::Admin), draft("U", "u@x.com"))
            .await
            .unwrap();

        let patch = PrincipalPatch {
            role: Some(Role::Admin),
            ..Default::default()
        };
        let err = svc
            .edit(&actor(Role::SuperAdmin), &user.id, patch)
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
    }

    #[tokio::test]
    async fn test_edit_missing_id() {
        let svc = service();
        let err = svc
            .edit(
                &actor(Role::SuperAdmin),
                &PrincipalId::new("missing"),
                PrincipalPatch::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_edit_surfaces_conflict() {
        let svc = service();
        let user = svc
            .create(&actor(Role::Admin), draft("U", "u@x.com"))
            .await
            .unwrap();

        // First edit bumps the version behind the second caller's back.
        svc.edit(
            &actor(Role::SuperAdmin),
            &user.id,
            PrincipalPatch {
                name: Some("First".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        // Simulate the stale caller by editing through the repository with
        // the old version directly.
        let err = svc
            .repo
            .update_if_version(
                &user.id,
                &PrincipalPatch {
                    name: Some("Second".to_string()),
                    ..Default::default()
                },
                user.version,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_protected_target_denied() {
        let svc = service();
        let admin_record = svc
            .create(
                &actor(Role::SuperAdmin),
                draft("Admin", "admin@x.com").with_role(Role::Admin),
            )
            .await
            .unwrap();

        let err = svc
            .delete(&actor(Role::SuperAdmin), &admin_record.id)
            .await
            .unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::ProtectedAccount));
        // Record is still there.
        assert!(svc
            .get(&actor(Role::SuperAdmin), &admin_record.id)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_in_outcome() {
        let svc = service();
        let user = svc
            .create(&actor(Role::Admin), draft("U", "u@x.com"))
            .await
            .unwrap();

        svc.delete(&actor(Role::Admin), &user.id).await.unwrap();
        let err = svc.delete(&actor(Role::Admin), &user.id).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades_attachments() {
        let svc = service();
        let user = svc
            .create(&actor(Role::Admin), draft("U", "u@x.com"))
            .await
            .unwrap();

        svc.attachments()
            .upload(
                &actor(Role::Admin),
                &user.id,
                "cv.pdf",
                "application/pdf",
                bytes::Bytes::from_static(b"pdf"),
            )
            .await
            .unwrap();
        assert_eq!(svc.attachments().list(&user.id).len(), 1);

        svc.delete(&actor(Role::Admin), &user.id).await.unwrap();
        assert!(svc.attachments().list(&user.id).is_empty());
    }

    #[tokio::test]
    async fn test_bulk_delete_mixed_targets() {
        let svc = service();
        let user = svc
            .create(&actor(Role::Admin), draft("U", "u@x.com"))
            .await
            .unwrap();
        let admin_record = svc
            .create(
                &actor(Role::SuperAdmin),
                draft("Admin", "admin@x.com").with_role(Role::Admin),
            )
            .await
            .unwrap();
        let missing = PrincipalId::new("missing-id");

        let ids = vec![user.id.clone(), admin_record.id.clone(), missing.clone()];
        let outcomes = svc.bulk_delete(&actor(Role::Admin), &ids).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].id, user.id);
        assert!(outcomes[0].is_applied());
        assert_eq!(outcomes[1].id, admin_record.id);
        assert_eq!(
            outcomes[1].status,
            roster_commons::OutcomeStatus::SkippedProtected
        );
        assert_eq!(outcomes[2].id, missing);
        assert_eq!(outcomes[2].status, roster_commons::OutcomeStatus::Failed);
        assert!(outcomes[2].error.is_some());

        // The protected record survived untouched.
        assert!(svc
            .get(&actor(Role::Admin), &admin_record.id)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_bulk_delete_collapses_duplicate_ids() {
        let svc = service();
        let user = svc
            .create(&actor(Role::Admin), draft("U", "u@x.com"))
            .await
            .unwrap();

        let ids = vec![user.id.clone(), user.id.clone(), user.id.clone()];
        let outcomes = svc.bulk_delete(&actor(Role::Admin), &ids).await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_applied());
    }

    #[tokio::test]
    async fn test_bulk_delete_never_raises_for_user_actor() {
        let svc = service();
        let user = svc
            .create(&actor(Role::Admin), draft("U", "u@x.com"))
            .await
            .unwrap();

        let outcomes = svc.bulk_delete(&actor(Role::User), &[user.id.clone()]).await;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, roster_commons::OutcomeStatus::Failed);
        // Target untouched.
        assert!(svc.get(&actor(Role::Admin), &user.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_read_scopes() {
        let svc = service();
        let stored = svc
            .create(&actor(Role::Admin), draft("U", "u@x.com"))
            .await
            .unwrap();

        // A USER reads its own record only.
        let own_session = Session::with_timestamp(stored.id.clone(), Role::User, 0);
        assert!(svc.get(&own_session, &stored.id).await.is_ok());

        let stranger = Session::with_timestamp(PrincipalId::new("stranger"), Role::User, 0);
        let err = svc.get(&stranger, &stored.id).await.unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::InsufficientRole));

        let err = svc.list(&stranger).await.unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::InsufficientRole));
    }
}
