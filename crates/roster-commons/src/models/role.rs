//! Role enum for the directory's privilege hierarchy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Privilege tier of a directory principal.
///
/// Roles are totally ordered: `User < Admin < SuperAdmin`. The derived
/// `Ord` relies on variant declaration order, which matches `rank()`.
///
/// Admin and SuperAdmin are *protected* roles: a principal holding one can
/// never be edited or deleted through the directory core, regardless of who
/// is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
}

impl Role {
    /// Numeric rank of the role: USER=0, ADMIN=1, SUPER_ADMIN=2.
    #[inline]
    pub fn rank(&self) -> u8 {
        match self {
            Role::User => 0,
            Role::Admin => 1,
            Role::SuperAdmin => 2,
        }
    }

    /// Whether principals holding this role are immune to edit/delete
    /// through the directory core.
    #[inline]
    pub fn is_protected(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            "SUPER_ADMIN" => Some(Role::SuperAdmin),
            _ => None,
        }
    }
}

impl FromStr for Role {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_str_opt(s).ok_or_else(|| format!("Invalid Role: {}", s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::User < Role::Admin);
        assert!(Role::Admin < Role::SuperAdmin);
        assert_eq!(Role::User.rank(), 0);
        assert_eq!(Role::Admin.rank(), 1);
        assert_eq!(Role::SuperAdmin.rank(), 2);
    }

    #[test]
    fn test_protected_roles() {
        assert!(!Role::User.is_protected());
        assert!(Role::Admin.is_protected());
        assert!(Role::SuperAdmin.is_protected());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::Admin, Role::SuperAdmin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("OPERATOR".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_wire_strings() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"SUPER_ADMIN\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_role_default() {
        assert_eq!(Role::default(), Role::User);
    }
}
