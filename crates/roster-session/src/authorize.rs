//! Centralized authorization decisions.
//!
//! One pure function decides every (actor, action, target) combination.
//! Rules are evaluated in precedence order and the first match wins; a
//! combination no rule explicitly allows is denied (fail closed).
//!
//! The protected-account rule is deliberately absolute: edit/delete on an
//! ADMIN or SUPER_ADMIN record is denied for every actor, including
//! SUPER_ADMIN itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rbac;
use crate::session::Session;
use roster_commons::{PrincipalId, Role};

/// Action requested against the directory or one of its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Create,
    Read,
    Edit,
    Delete,
    BulkDelete,
    UploadAttachment,
    DeleteAttachment,
    Export,
}

impl Action {
    /// Whether the action mutates a specific record and therefore falls
    /// under the protected-account rule.
    #[inline]
    pub fn is_record_mutation(&self) -> bool {
        matches!(self, Action::Edit | Action::Delete | Action::BulkDelete)
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenyReason {
    /// The target holds a protected role (ADMIN or SUPER_ADMIN).
    #[serde(rename = "protected_account")]
    ProtectedAccount,
    /// The actor's role does not grant this action.
    #[serde(rename = "insufficient_role")]
    InsufficientRole,
    /// The actor is neither the record owner nor an administrator.
    #[serde(rename = "not_owner")]
    NotOwner,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::ProtectedAccount => "protected_account",
            DenyReason::InsufficientRole => "insufficient_role",
            DenyReason::NotOwner => "not_owner",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    #[inline]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Convert into a `Result`, handing the deny reason to the caller.
    #[inline]
    pub fn into_result(self) -> Result<(), DenyReason> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(reason),
        }
    }
}

/// What the action is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The directory as a whole (create, export, whole-directory read).
    Directory,
    /// A specific record, identified by id and its *current* role.
    Record { id: &'a PrincipalId, role: Role },
    /// An attachment set, identified by its owning principal. Attachment
    /// decisions depend on ownership only, never on the owner's role.
    Owner { id: &'a PrincipalId },
}

impl<'a> Target<'a> {
    pub fn record(id: &'a PrincipalId, role: Role) -> Self {
        Target::Record { id, role }
    }

    pub fn owner(id: &'a PrincipalId) -> Self {
        Target::Owner { id }
    }

    #[inline]
    fn is_protected(&self) -> bool {
        matches!(self, Target::Record { role, .. } if role.is_protected())
    }

    #[inline]
    fn is_owned_by(&self, actor: &PrincipalId) -> bool {
        match self {
            Target::Record { id, .. } | Target::Owner { id } => *id == actor,
            Target::Directory => false,
        }
    }
}

/// Decide whether `actor` may perform `action` on `target`.
///
/// Rules, first match wins:
/// 1. edit/delete/bulk-delete on a protected record → deny
///    `protected_account`, regardless of actor role.
/// 2. create/export → allow for ADMIN and SUPER_ADMIN.
/// 3. delete/bulk-delete on a non-protected record → allow for ADMIN and
///    SUPER_ADMIN.
/// 4. edit on a non-protected record → allow only for SUPER_ADMIN.
/// 5. read → admins read the whole directory; a USER reads only its own
///    record.
/// 6. upload/delete attachment → record owner, or an admin acting
///    administratively.
///
/// Deterministic and side-effect free.
pub fn authorize(actor: &Session, action: Action, target: Target<'_>) -> Decision {
    // Rule 1: protected accounts are immune to record mutations.
    if action.is_record_mutation() && target.is_protected() {
        return Decision::Deny(DenyReason::ProtectedAccount);
    }

    match action {
        Action::Create | Action::Export => {
            if rbac::can_manage_directory(actor.role) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::InsufficientRole)
            }
        }
        Action::Delete | Action::BulkDelete => match target {
            Target::Record { .. } if rbac::can_manage_directory(actor.role) => Decision::Allow,
            // Record mutations need a record target; fail closed otherwise.
            _ => Decision::Deny(DenyReason::InsufficientRole),
        },
        Action::Edit => match target {
            Target::Record { .. } if rbac::can_edit_records(actor.role) => Decision::Allow,
            _ => Decision::Deny(DenyReason::InsufficientRole),
        },
        Action::Read => {
            if rbac::is_admin_role(actor.role) {
                Decision::Allow
            } else if target.is_owned_by(&actor.principal_id) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::InsufficientRole)
            }
        }
        Action::UploadAttachment | Action::DeleteAttachment => {
            if target.is_owned_by(&actor.principal_id) || rbac::is_admin_role(actor.role) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotOwner)
            }
        }
    }
}
