//! # roster-directory
//!
//! The directory core of Roster: repository contract, mutation pipeline,
//! search, and export.
//!
//! This crate provides:
//! - [`DirectoryRepository`]: narrow async persistence contract with a
//!   conditional-update primitive (version keyed) so concurrent edits are
//!   detected, never silently overwritten
//! - [`MemoryDirectoryRepository`]: DashMap-backed reference implementation
//!   used by tests and single-process embedders
//! - [`DirectoryService`]: the mutation pipeline — every create/edit/
//!   delete/bulk-delete passes through the authorization engine before any
//!   repository write, and principal deletion cascades attachment cleanup
//!   as one logical unit
//! - [`index`]: pure read-side search over a directory snapshot
//! - [`ExportSink`]: rows-out seam for tabular export; the core supplies
//!   data and never formats
//!
//! ## Architecture
//!
//! ```text
//! Session ──▶ authorize() ──▶ DirectoryService ──▶ DirectoryRepository
//!                                   │
//!                                   └──cascade──▶ AttachmentRegistry
//! ```
//!
//! The crate holds no global state: collaborators are injected, so
//! parallel test instances never interfere.

pub mod error;
pub mod export;
pub mod index;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{DirectoryError, Result};
pub use export::ExportSink;
pub use index::filter;
pub use repository::{DirectoryRepository, MemoryDirectoryRepository};
pub use service::DirectoryService;
