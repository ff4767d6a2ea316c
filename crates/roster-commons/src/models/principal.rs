//! Principal entity for the directory.

use serde::{Deserialize, Serialize};

use crate::constants::DirectoryConstants;
use crate::errors::{CommonError, Result};
use crate::models::{CredentialRef, PrincipalId, Role};

/// A directory member.
///
/// ## Fields
/// - `id`: opaque stable identifier, assigned by the repository at creation
///   and never reused
/// - `name`: optional display name
/// - `email`: required, unique within the directory (uniqueness is enforced
///   by the repository, not here)
/// - `credential_ref`: opaque handle to the external identity record; the
///   core never stores or inspects raw secrets
/// - `role`: privilege tier
/// - `version`: optimistic-concurrency token, owned and incremented by the
///   repository on every successful write
/// - `created_at` / `updated_at`: Unix timestamps in milliseconds
///
/// A principal with a protected role (ADMIN or SUPER_ADMIN) can never be
/// the target of an edit or delete issued through the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    pub name: Option<String>,
    pub email: String,
    pub credential_ref: CredentialRef,
    pub role: Role,
    pub version: u64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Principal {
    /// Whether this principal is immune to edit/delete through the core.
    #[inline]
    pub fn is_protected(&self) -> bool {
        self.role.is_protected()
    }

    /// Builds the stored record for a validated draft. Used by repository
    /// implementations; `version` starts at 1.
    pub fn from_draft(id: PrincipalId, draft: PrincipalDraft, now_ms: i64) -> Self {
        let role = draft.role.unwrap_or(DirectoryConstants::DEFAULT_ROLE);
        Self {
            id,
            name: draft.name,
            email: draft.email,
            credential_ref: draft.credential_ref,
            role,
            version: 1,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Display name with the empty-string fallback used by search and
    /// export surfaces.
    #[inline]
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Input for creating a new principal.
///
/// `role` defaults to USER when absent; administrative callers may request
/// a different role explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalDraft {
    pub name: Option<String>,
    pub email: String,
    pub credential_ref: CredentialRef,
    #[serde(default)]
    pub role: Option<Role>,
}

impl PrincipalDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        credential_ref: impl Into<CredentialRef>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
            credential_ref: credential_ref.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Validates the required fields: `name`, `email`, and
    /// `credential_ref` must all be non-empty.
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) if !name.trim().is_empty() => {}
            _ => return Err(CommonError::missing_field("name")),
        }
        if self.email.trim().is_empty() {
            return Err(CommonError::missing_field("email"));
        }
        if self.credential_ref.is_empty() {
            return Err(CommonError::missing_field("credential_ref"));
        }
        Ok(())
    }
}

/// Partial update applied through the edit path.
///
/// `role` may never be set to a protected value here — elevation to ADMIN
/// or SUPER_ADMIN is an out-of-band process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl PrincipalPatch {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }

    /// Rejects patches that try to grant a protected role.
    pub fn validate(&self) -> Result<()> {
        if let Some(role) = self.role {
            if role.is_protected() {
                return Err(CommonError::invalid_input(format!(
                    "Role '{}' cannot be assigned through the edit path",
                    role
                )));
            }
        }
        if let Some(email) = &self.email {
            if email.trim().is_empty() {
                return Err(CommonError::missing_field("email"));
            }
        }
        Ok(())
    }

    /// Applies the patch fields onto a record. The repository owns the
    /// `version` and `updated_at` bumps.
    pub fn apply_to(&self, record: &mut Principal) {
        if let Some(name) = &self.name {
            record.name = Some(name.clone());
        }
        if let Some(email) = &self.email {
            record.email = email.clone();
        }
        if let Some(role) = self.role {
            record.role = role;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PrincipalDraft {
        PrincipalDraft::new("Alice", "alice@example.com", "cred_1")
    }

    #[test]
    fn test_draft_validate_ok() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_draft_validate_rejects_empty_fields() {
        let mut d = draft();
        d.name = None;
        assert!(d.validate().is_err());

        let mut d = draft();
        d.name = Some("   ".to_string());
        assert!(d.validate().is_err());

        let mut d = draft();
        d.email = "".to_string();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.credential_ref = CredentialRef::new("");
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_from_draft_defaults_role_to_user() {
        let p = Principal::from_draft(PrincipalId::new("p_1"), draft(), 1_730_000_000_000);
        assert_eq!(p.role, Role::User);
        assert_eq!(p.version, 1);
        assert_eq!(p.created_at, p.updated_at);
    }

    #[test]
    fn test_from_draft_honors_requested_role() {
        let p = Principal::from_draft(
            PrincipalId::new("p_2"),
            draft().with_role(Role::Admin),
            1_730_000_000_000,
        );
        assert_eq!(p.role, Role::Admin);
        assert!(p.is_protected());
    }

    #[test]
    fn test_patch_rejects_protected_role() {
        let patch = PrincipalPatch {
            role: Some(Role::SuperAdmin),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = PrincipalPatch {
            role: Some(Role::User),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_patch_apply_to() {
        let mut p = Principal::from_draft(PrincipalId::new("p_3"), draft(), 0);
        let patch = PrincipalPatch {
            name: Some("Alicia".to_string()),
            email: None,
            role: None,
        };
        patch.apply_to(&mut p);
        assert_eq!(p.name.as_deref(), Some("Alicia"));
        assert_eq!(p.email, "alice@example.com");
    }

    #[test]
    fn test_name_or_empty() {
        let mut p = Principal::from_draft(PrincipalId::new("p_4"), draft(), 0);
        assert_eq!(p.name_or_empty(), "Alice");
        p.name = None;
        assert_eq!(p.name_or_empty(), "");
    }
}
