//! Session resolution: from external identity to role-bearing session.

use std::sync::Arc;

use crate::error::{AuthError, AuthResult};
use crate::provider::{ExternalIdentity, IdentityProvider};
use roster_commons::constants::ValidationConstants;
use roster_commons::{Principal, PrincipalDraft, Role};
use roster_directory::DirectoryRepository;
use roster_session::Session;

/// Maps successful external authentications onto directory records.
pub struct SessionResolver {
    repo: Arc<dyn DirectoryRepository>,
}

impl SessionResolver {
    pub fn new(repo: Arc<dyn DirectoryRepository>) -> Self {
        Self { repo }
    }

    /// Resolve an authenticated identity to a session.
    ///
    /// The session snapshots the principal's role at this instant; a later
    /// role change does not retroactively update it. Authentication
    /// without a directory record is a reportable inconsistency, never a
    /// silent logged-out state.
    pub async fn resolve(&self, identity: &ExternalIdentity) -> AuthResult<Session> {
        let principal = self
            .repo
            .find_by_credential(&identity.uid)
            .await?
            .ok_or_else(|| {
                log::warn!(
                    "Authenticated identity '{}' has no directory record",
                    identity.email
                );
                AuthError::DirectoryInconsistency(format!(
                    "no directory record for authenticated identity '{}'",
                    identity.email
                ))
            })?;

        log::info!(
            "Resolved session: principal={}, role={}",
            principal.id,
            principal.role
        );
        Ok(Session::new(principal.id, principal.role))
    }

    /// Authenticate against the provider and resolve in one step.
    pub async fn login(
        &self,
        provider: &dyn IdentityProvider,
        email: &str,
        password: &str,
    ) -> AuthResult<Session> {
        let identity = provider.authenticate(email, password).await?;
        self.resolve(&identity).await
    }

    /// Self-service registration.
    ///
    /// Creates the external identity, then the matching directory record
    /// with role USER. This path is unauthenticated and does not go
    /// through the admin-only create gate.
    pub async fn register(
        &self,
        provider: &dyn IdentityProvider,
        name: &str,
        email: &str,
        password: &str,
    ) -> AuthResult<Principal> {
        validate_registration(name, email, password)?;

        let identity = provider.register(email, password).await?;

        let draft = PrincipalDraft::new(name, email, identity.uid.clone()).with_role(Role::User);
        let principal = self.repo.put(draft).await.map_err(|e| {
            // The identity exists but the directory write failed; surface
            // the directory error so the caller can reconcile.
            log::warn!(
                "Registered identity '{}' but directory write failed: {}",
                email,
                e
            );
            AuthError::from(e)
        })?;

        log::info!("Registered principal: id={}, email={}", principal.id, email);
        Ok(principal)
    }
}

/// Registration input rules, mirroring the public sign-up form: name of a
/// minimum length, plausible email, minimum password length.
fn validate_registration(name: &str, email: &str, password: &str) -> AuthResult<()> {
    if name.trim().len() < ValidationConstants::MIN_NAME_LEN {
        return Err(AuthError::validation(format!(
            "Name must be at least {} characters",
            ValidationConstants::MIN_NAME_LEN
        )));
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AuthError::validation("Invalid email address"));
    }
    if password.len() < ValidationConstants::MIN_PASSWORD_LEN {
        return Err(AuthError::validation(format!(
            "Password must be at least {} characters",
            ValidationConstants::MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryIdentityProvider;
    use roster_directory::MemoryDirectoryRepository;

    fn resolver() -> (SessionResolver, Arc<MemoryDirectoryRepository>) {
        let repo = Arc::new(MemoryDirectoryRepository::new());
        (SessionResolver::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (resolver, _repo) = resolver();
        let provider = MemoryIdentityProvider::new();

        let principal = resolver
            .register(&provider, "Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(principal.role, Role::User);

        let session = resolver
            .login(&provider, "alice@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(session.principal_id, principal.id);
        assert_eq!(session.role, Role::User);
    }

    #[tokio::test]
    async fn test_resolve_missing_record_is_inconsistency() {
        let (resolver, _repo) = resolver();
        let provider = MemoryIdentityProvider::new();
        // Identity exists, directory record does not.
        let identity = provider.with_account("ghost@example.com", "secret1");

        let err = resolver.resolve(&identity).await.unwrap_err();
        assert!(matches!(err, AuthError::DirectoryInconsistency(_)));
    }

    #[tokio::test]
    async fn test_registration_validation() {
        let (resolver, _repo) = resolver();
        let provider = MemoryIdentityProvider::new();

        // Name too short.
        let err = resolver
            .register(&provider, "Al", "al@example.com", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        // Malformed email.
        let err = resolver
            .register(&provider, "Alice", "not-an-email", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        // Short password.
        let err = resolver
            .register(&provider, "Alice", "alice@example.com", "12345")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_duplicate_identity_surfaces_already_exists() {
        let (resolver, _repo) = resolver();
        let provider = MemoryIdentityProvider::new();

        resolver
            .register(&provider, "Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        let err = resolver
            .register(&provider, "Alice Again", "alice@example.com", "secret2")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_session_snapshots_role_at_resolution() {
        let (resolver, repo) = resolver();
        let provider = MemoryIdentityProvider::new();

        let principal = resolver
            .register(&provider, "Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        let session = resolver
            .login(&provider, "alice@example.com", "secret1")
            .await
            .unwrap();

        // A later role change in the directory does not touch the live
        // session snapshot.
        repo.update_if_version(
            &principal.id,
            &roster_commons::PrincipalPatch {
                name: Some("Alicia".to_string()),
                ..Default::default()
            },
            principal.version,
        )
        .await
        .unwrap();
        assert_eq!(session.role, Role::User);
    }
}
