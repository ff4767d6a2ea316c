//! Shared constants for Roster.

/// Validation limits applied to self-service registration input.
pub struct ValidationConstants;

impl ValidationConstants {
    /// Minimum display-name length accepted at registration.
    pub const MIN_NAME_LEN: usize = 3;

    /// Minimum password length forwarded to the identity provider.
    pub const MIN_PASSWORD_LEN: usize = 6;
}

/// Well-known directory defaults.
pub struct DirectoryConstants;

impl DirectoryConstants {
    /// Role assigned to newly created principals when none is requested.
    pub const DEFAULT_ROLE: crate::models::Role = crate::models::Role::User;
}
