//! Identity provider contract.
//!
//! The identity provider is an external collaborator: it owns credentials,
//! their storage, and their cryptography. The core only consumes this
//! narrow surface and receives opaque identity handles back.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{AuthError, AuthResult};
use roster_commons::CredentialRef;

/// A successfully authenticated (or freshly registered) external identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    /// Stable handle to the identity record. Doubles as the
    /// `credential_ref` stored on the matching directory principal.
    pub uid: CredentialRef,
    pub email: String,
}

/// Abstraction over the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials. Fails with `InvalidCredentials`.
    async fn authenticate(&self, email: &str, password: &str) -> AuthResult<ExternalIdentity>;

    /// Create a new identity. Fails with `AlreadyExists` when the email is
    /// taken.
    async fn register(&self, email: &str, password: &str) -> AuthResult<ExternalIdentity>;
}

/// In-memory identity provider for tests and local development.
///
/// Stores plain passwords; never use outside a test process. Emails are
/// compared case-insensitively, matching common provider behavior.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    // email (lowercase) -> (password, uid)
    accounts: DashMap<String, (String, CredentialRef)>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account directly, returning its identity handle.
    pub fn with_account(&self, email: &str, password: &str) -> ExternalIdentity {
        let uid = CredentialRef::new(nanoid::nanoid!());
        self.accounts
            .insert(email.to_lowercase(), (password.to_string(), uid.clone()));
        ExternalIdentity {
            uid,
            email: email.to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn authenticate(&self, email: &str, password: &str) -> AuthResult<ExternalIdentity> {
        match self.accounts.get(&email.to_lowercase()) {
            Some(entry) if entry.value().0 == password => Ok(ExternalIdentity {
                uid: entry.value().1.clone(),
                email: email.to_string(),
            }),
            _ => {
                log::warn!("Failed authentication attempt for {}", email);
                Err(AuthError::invalid_credentials())
            }
        }
    }

    async fn register(&self, email: &str, password: &str) -> AuthResult<ExternalIdentity> {
        let key = email.to_lowercase();
        if self.accounts.contains_key(&key) {
            return Err(AuthError::AlreadyExists(email.to_string()));
        }
        let uid = CredentialRef::new(nanoid::nanoid!());
        self.accounts
            .insert(key, (password.to_string(), uid.clone()));
        Ok(ExternalIdentity {
            uid,
            email: email.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let provider = MemoryIdentityProvider::new();
        let registered = provider.register("alice@example.com", "secret1").await.unwrap();

        let authed = provider
            .authenticate("alice@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(authed.uid, registered.uid);

        let err = provider
            .authenticate("alice@example.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let provider = MemoryIdentityProvider::new();
        provider.register("alice@example.com", "secret1").await.unwrap();
        let err = provider
            .register("ALICE@example.com", "other")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_unknown_email_uniform_error() {
        let provider = MemoryIdentityProvider::new();
        let err = provider
            .authenticate("nobody@example.com", "pw")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials: Invalid email or password");
    }
}
