//! Role-based access helpers (RBAC)
//!
//! Centralized role predicates for directory operations. The full
//! precedence-ordered decision table lives in [`crate::authorize`]; these
//! helpers answer the coarse role questions it is built from.

use roster_commons::Role;

/// Numeric rank of a role: USER=0, ADMIN=1, SUPER_ADMIN=2.
#[inline]
pub fn rank(role: Role) -> u8 {
    role.rank()
}

/// Check if a role marks its holder as a protected account.
///
/// Protected accounts (ADMIN, SUPER_ADMIN) are immune to edit/delete
/// through the directory core, regardless of who is asking.
#[inline]
pub fn is_protected(role: Role) -> bool {
    role.is_protected()
}

/// Check if a role has admin privileges.
#[inline]
pub fn is_admin_role(role: Role) -> bool {
    matches!(role, Role::Admin | Role::SuperAdmin)
}

/// Check if a role can create principals and run bulk deletes.
///
/// # Access Rules
/// - **SUPER_ADMIN**: allowed
/// - **ADMIN**: allowed
/// - **USER**: DENIED
#[inline]
pub fn can_manage_directory(role: Role) -> bool {
    is_admin_role(role)
}

/// Check if a role can export directory data.
#[inline]
pub fn can_export(role: Role) -> bool {
    is_admin_role(role)
}

/// Check if a role can edit (patch) non-protected records.
///
/// Only SUPER_ADMIN may edit; ADMIN can list and delete but not patch.
#[inline]
pub fn can_edit_records(role: Role) -> bool {
    matches!(role, Role::SuperAdmin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(rank(Role::User) < rank(Role::Admin));
        assert!(rank(Role::Admin) < rank(Role::SuperAdmin));
    }

    #[test]
    fn test_admin_predicates() {
        assert!(!is_admin_role(Role::User));
        assert!(is_admin_role(Role::Admin));
        assert!(is_admin_role(Role::SuperAdmin));
        assert!(can_manage_directory(Role::Admin));
        assert!(can_export(Role::SuperAdmin));
        assert!(!can_export(Role::User));
    }

    #[test]
    fn test_edit_is_super_admin_only() {
        assert!(!can_edit_records(Role::User));
        assert!(!can_edit_records(Role::Admin));
        assert!(can_edit_records(Role::SuperAdmin));
    }
}
