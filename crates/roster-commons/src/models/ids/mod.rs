//! Type-safe identifier wrappers.

mod blob_ref;
mod credential_ref;
mod principal_id;

pub use blob_ref::BlobRef;
pub use credential_ref::CredentialRef;
pub use principal_id::{PrincipalId, PrincipalIdValidationError};
