//! Directory bootstrap: seed the initial administrative accounts.
//!
//! Run once at deployment start. Seeding is idempotent: identities that
//! already exist are logged and skipped, so repeated runs converge.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::provider::IdentityProvider;
use roster_commons::{PrincipalDraft, Role};
use roster_directory::DirectoryRepository;

/// One account to ensure at bootstrap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAccount {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Ensure each seed account exists in both the identity provider and the
/// directory.
///
/// Accounts whose identity already exists are skipped; any other failure
/// aborts the run. Returns the number of accounts created.
pub async fn seed_directory(
    provider: &dyn IdentityProvider,
    repo: &Arc<dyn DirectoryRepository>,
    accounts: &[SeedAccount],
) -> Result<usize> {
    let mut created = 0;

    for account in accounts {
        let identity = match provider.register(&account.email, &account.password).await {
            Ok(identity) => identity,
            Err(AuthError::AlreadyExists(_)) => {
                log::info!("{} already exists.", account.role);
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to register seed identity '{}'", account.email)
                });
            }
        };

        let mut draft =
            PrincipalDraft::new("", account.email.clone(), identity.uid).with_role(account.role);
        draft.name = account.name.clone();

        repo.put(draft)
            .await
            .with_context(|| format!("Failed to store seed principal '{}'", account.email))?;

        log::info!("{} initialized successfully.", account.role);
        created += 1;
    }

    Ok(created)
}

/// Development seed set: one SUPER_ADMIN and one ADMIN.
///
/// Matches the conventional example accounts; production deployments pass
/// their own list from configuration.
pub fn default_seed_accounts() -> Vec<SeedAccount> {
    vec![
        SeedAccount {
            name: None,
            email: "superadmin@example.com".to_string(),
            password: "superadmin123".to_string(),
            role: Role::SuperAdmin,
        },
        SeedAccount {
            name: None,
            email: "admin@example.com".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
        },
    ]
}
