//! Type-safe wrapper types and directory entities for Roster.
//!
//! This module provides newtype wrappers around String to enforce type
//! safety at compile time (a `PrincipalId` cannot be passed where a
//! `BlobRef` is expected) plus the directory entity models themselves.
//!
//! ## Examples
//!
//! ```rust
//! use roster_commons::models::{PrincipalId, Role};
//!
//! let id = PrincipalId::new("p_123");
//! assert_eq!(id.as_str(), "p_123");
//!
//! // Type safety prevents mixing
//! // let wrong: PrincipalId = BlobRef::new("b_1"); // Compile error!
//! ```

pub mod ids;

mod attachment;
mod outcome;
mod principal;
mod role;

pub use attachment::AttachmentRecord;
pub use ids::{BlobRef, CredentialRef, PrincipalId};
pub use outcome::{MutationOutcome, OutcomeStatus};
pub use principal::{Principal, PrincipalDraft, PrincipalPatch};
pub use role::Role;
