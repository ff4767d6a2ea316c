//! # roster-filestore
//!
//! Attachment storage for Roster.
//!
//! This crate handles per-principal file attachments:
//! - **Blob store contract**: opaque byte storage behind [`BlobStore`],
//!   with in-memory and local-filesystem implementations
//! - **Attachment registry**: owner-keyed metadata index enforcing strict
//!   per-owner isolation and the duplicate-name policy
//! - **Limits**: upload size and MIME-type restrictions
//!
//! ## Architecture
//!
//! ```text
//! DirectoryService ──cascade──▶ AttachmentRegistry ──bytes──▶ BlobStore
//!        caller ──upload/list/delete──▲
//! ```
//!
//! Ownership isolation is an explicit invariant: every operation is keyed
//! by the owning principal id, and upload/delete consult the authorization
//! engine before touching storage.

pub mod blob_store;
pub mod config;
pub mod error;
pub mod registry;

// Re-export commonly used types
pub use blob_store::{BlobStore, LocalBlobStore, MemoryBlobStore};
pub use config::AttachmentLimits;
pub use error::{FilestoreError, Result};
pub use registry::AttachmentRegistry;
