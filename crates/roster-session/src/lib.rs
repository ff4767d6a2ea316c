//! # roster-session
//!
//! Session context and centralized authorization for Roster.
//!
//! This crate provides:
//! - [`Session`]: role-bearing handle for one authenticated interaction
//! - [`rbac`]: role hierarchy helpers (rank, protection, admin checks)
//! - [`authorize`]: the pure decision function gating every directory and
//!   attachment mutation
//!
//! ## Security Philosophy
//!
//! - **Single decision point**: every mutation path consults
//!   [`authorize::authorize`] before touching a collaborator.
//! - **Fail closed**: an action/target combination the rules do not
//!   explicitly allow is denied.
//! - **Protected accounts**: edit/delete on ADMIN or SUPER_ADMIN targets is
//!   denied for every actor, including SUPER_ADMIN itself.

pub mod authorize;
pub mod rbac;
pub mod session;

// Re-export main types
pub use authorize::{authorize, Action, Decision, DenyReason, Target};
pub use rbac::{can_export, can_manage_directory, is_admin_role, is_protected, rank};
pub use session::Session;
