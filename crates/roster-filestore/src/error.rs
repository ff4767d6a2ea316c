//! Error types for attachment storage.

use thiserror::Error;

use roster_session::DenyReason;

/// Errors raised by the attachment registry and blob store implementations.
#[derive(Error, Debug)]
pub enum FilestoreError {
    #[error("Permission denied: {0}")]
    Authorization(DenyReason),

    #[error("Attachment already exists: {owner}/{file_name}")]
    DuplicateAttachment { owner: String, file_name: String },

    #[error("Attachment not found: {owner}/{file_name}")]
    NotFound { owner: String, file_name: String },

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("File '{file_name}' exceeds maximum size of {max} bytes ({size} bytes)")]
    TooLarge {
        file_name: String,
        size: usize,
        max: usize,
    },

    #[error("MIME type '{mime_type}' not allowed for file '{file_name}'")]
    MimeNotAllowed { mime_type: String, file_name: String },

    #[error("Blob store error: {0}")]
    Blob(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilestoreError {
    /// Create a duplicate-attachment error
    pub fn duplicate(owner: impl Into<String>, file_name: impl Into<String>) -> Self {
        FilestoreError::DuplicateAttachment {
            owner: owner.into(),
            file_name: file_name.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(owner: impl Into<String>, file_name: impl Into<String>) -> Self {
        FilestoreError::NotFound {
            owner: owner.into(),
            file_name: file_name.into(),
        }
    }

    /// Create a blob store error
    pub fn blob<S: Into<String>>(msg: S) -> Self {
        FilestoreError::Blob(msg.into())
    }
}

/// Result type alias using FilestoreError.
pub type Result<T> = std::result::Result<T, FilestoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FilestoreError::duplicate("p_1", "notes.txt");
        assert_eq!(err.to_string(), "Attachment already exists: p_1/notes.txt");

        let err = FilestoreError::not_found("p_1", "gone.txt");
        assert_eq!(err.to_string(), "Attachment not found: p_1/gone.txt");

        let err = FilestoreError::Authorization(DenyReason::NotOwner);
        assert_eq!(err.to_string(), "Permission denied: not_owner");
    }
}
