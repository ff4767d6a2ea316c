//! Per-item result types for bulk mutations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::PrincipalId;

/// Status of one item within a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    /// The mutation was applied to this target.
    #[serde(rename = "applied")]
    Applied,
    /// The target holds a protected role and was never attempted.
    #[serde(rename = "skipped_protected")]
    SkippedProtected,
    /// The mutation was attempted and failed; see `error`.
    #[serde(rename = "failed")]
    Failed,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Applied => "applied",
            OutcomeStatus::SkippedProtected => "skipped_protected",
            OutcomeStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one item within a bulk operation.
///
/// A bulk operation produces an ordered sequence of these, one per
/// requested target, preserving request order; no id appears twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub id: PrincipalId,
    pub status: OutcomeStatus,
    /// Error detail when `status` is `Failed`.
    pub error: Option<String>,
}

impl MutationOutcome {
    /// The mutation was applied.
    pub fn applied(id: PrincipalId) -> Self {
        Self {
            id,
            status: OutcomeStatus::Applied,
            error: None,
        }
    }

    /// The target was protected and skipped without being attempted.
    pub fn skipped_protected(id: PrincipalId) -> Self {
        Self {
            id,
            status: OutcomeStatus::SkippedProtected,
            error: None,
        }
    }

    /// The mutation failed with the given detail.
    pub fn failed(id: PrincipalId, error: impl Into<String>) -> Self {
        Self {
            id,
            status: OutcomeStatus::Failed,
            error: Some(error.into()),
        }
    }

    #[inline]
    pub fn is_applied(&self) -> bool {
        self.status == OutcomeStatus::Applied
    }
}
