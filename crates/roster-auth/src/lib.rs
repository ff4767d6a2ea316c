//! # roster-auth
//!
//! Authentication boundary for Roster: the identity-provider contract, the
//! session resolver that maps authenticated identities onto directory
//! records, self-service registration, and directory bootstrap.
//!
//! The identity provider owns credentials and their cryptography; this
//! crate never sees a password hash. What it does own is the mapping from
//! a successful external authentication to a role-bearing [`Session`]
//! snapshot — including the "authenticated but no directory record" state,
//! which is surfaced as an explicit error instead of silently degrading to
//! anonymous.
//!
//! [`Session`]: roster_session::Session

pub mod bootstrap;
pub mod error;
pub mod provider;
pub mod resolver;

// Re-export commonly used types
pub use bootstrap::{seed_directory, SeedAccount};
pub use error::{AuthError, AuthResult};
pub use provider::{ExternalIdentity, IdentityProvider, MemoryIdentityProvider};
pub use resolver::SessionResolver;
