//! Authenticated session context.
//!
//! A [`Session`] is the bridge between the authentication layer and the
//! directory operations: it carries the resolved principal id and a role
//! snapshot captured at resolution time. A role change elsewhere does not
//! retroactively update a live session.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use roster_commons::{PrincipalId, Role};

/// Resolved, role-bearing handle for one authenticated interaction.
///
/// Sessions are owned exclusively by the caller; the core never mutates a
/// session after returning it. They are process-local and carry no
/// persistence requirement — logout or expiry simply drops the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated principal.
    pub principal_id: PrincipalId,
    /// Role snapshot captured at resolution time.
    pub role: Role,
    /// Unix timestamp in milliseconds when the session was resolved.
    pub resolved_at: i64,
}

impl Session {
    /// Create a session for the given principal, snapshotting the role now.
    pub fn new(principal_id: PrincipalId, role: Role) -> Self {
        Self {
            principal_id,
            role,
            resolved_at: Utc::now().timestamp_millis(),
        }
    }

    /// Create a session with an explicit resolution timestamp.
    pub fn with_timestamp(principal_id: PrincipalId, role: Role, resolved_at: i64) -> Self {
        Self {
            principal_id,
            role,
            resolved_at,
        }
    }

    #[inline]
    pub fn principal_id(&self) -> &PrincipalId {
        &self.principal_id
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn resolved_at(&self) -> i64 {
        self.resolved_at
    }

    /// Check if this session holds an admin tier (ADMIN or SUPER_ADMIN).
    #[inline]
    pub fn is_admin(&self) -> bool {
        crate::rbac::is_admin_role(self.role)
    }

    /// Check if this session holds SUPER_ADMIN.
    #[inline]
    pub fn is_super_admin(&self) -> bool {
        matches!(self.role, Role::SuperAdmin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_new() {
        let session = Session::new(PrincipalId::new("alice"), Role::User);
        assert_eq!(session.principal_id().as_str(), "alice");
        assert_eq!(session.role(), Role::User);
        assert!(!session.is_admin());
        assert!(session.resolved_at() > 0);
    }

    #[test]
    fn test_session_admin_checks() {
        let admin = Session::new(PrincipalId::new("admin"), Role::Admin);
        assert!(admin.is_admin());
        assert!(!admin.is_super_admin());

        let root = Session::new(PrincipalId::new("root"), Role::SuperAdmin);
        assert!(root.is_admin());
        assert!(root.is_super_admin());
    }

    #[test]
    fn test_session_snapshot_is_immutable_after_clone() {
        // A role change elsewhere must not retroactively update a session;
        // the snapshot is plain data with no shared state.
        let session = Session::with_timestamp(PrincipalId::new("bob"), Role::User, 1_000);
        let copy = session.clone();
        assert_eq!(session, copy);
        assert_eq!(copy.resolved_at(), 1_000);
    }
}
