//! # roster-commons
//!
//! Shared types, constants, and utilities for Roster.
//!
//! This crate provides foundational types used across all Roster crates
//! (roster-session, roster-directory, roster-filestore, roster-auth). It sits
//! at the bottom of the dependency graph to prevent circular dependency
//! issues.
//!
//! ## Type-Safe Wrappers
//!
//! - `PrincipalId`: directory member identifier
//! - `CredentialRef`: opaque handle into the external identity provider
//! - `BlobRef`: opaque handle into the external blob store
//!
//! ## Directory Models
//!
//! The `models` module is the single source of truth for directory entities:
//! - `Principal`: a directory member with an identity and a role
//! - `Role`: privilege tier (USER < ADMIN < SUPER_ADMIN)
//! - `AttachmentRecord`: per-principal file attachment metadata
//! - `MutationOutcome`: per-item result within a bulk operation
//!
//! ## Example Usage
//!
//! ```rust
//! use roster_commons::{PrincipalId, Role};
//!
//! let id = PrincipalId::new("p_123");
//! assert_eq!(id.as_str(), "p_123");
//! assert!(Role::Admin.is_protected());
//! ```

pub mod constants;
pub mod errors;
pub mod models;

// Re-export commonly used types at crate root
pub use errors::{CommonError, Result};
pub use models::{
    AttachmentRecord, BlobRef, CredentialRef, MutationOutcome, OutcomeStatus, Principal,
    PrincipalDraft, PrincipalId, PrincipalPatch, Role,
};
