//! Change requests against a task's descriptive fields.
//!
//! The task's creator or assignee (or an admin) proposes changes; an admin,
//! or the creator when someone else asked, approves or rejects them.
//! Approval applies the proposed fields to the task.

use serde::{Deserialize, Serialize};

use crate::authz::{DenyReason, Decision};
use crate::error::CoreError;
use crate::identity::{same_email, Identity};
use crate::lifecycle::{define_wire_enum, plan_terminal_decision, Transition};

define_wire_enum! {
    /// Review status of a task modification request.
    ModificationStatus ("modification status") {
        Pending => "PENDING",
        Approved => "APPROVED",
        Rejected => "REJECTED",
    }
}

/// The subset of task fields a modification may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverables: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl ProposedChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deliverables.is_none()
            && self.platform.is_none()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Err(CoreError::Validation(
                "proposed_changes must change at least one field".into(),
            ));
        }
        for (field, value) in [("title", &self.title), ("description", &self.description)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(CoreError::Validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Who may propose a change: the task's creator, its assignee, or an admin.
pub fn can_request(identity: &Identity, created_by: &str, assignee: &str) -> Decision {
    if !identity.is_authenticated() {
        return Decision::Deny(DenyReason::Unauthenticated);
    }
    if identity.is_admin() {
        return Decision::Allow;
    }
    match identity.email() {
        Some(email) if same_email(email, created_by) || same_email(email, assignee) => {
            Decision::Allow
        }
        _ => Decision::Deny(DenyReason::Forbidden),
    }
}

/// Who may review a change: an admin, or the task's creator when the
/// request came from someone else.
pub fn can_review(identity: &Identity, created_by: &str, requested_by: &str) -> Decision {
    if !identity.is_authenticated() {
        return Decision::Deny(DenyReason::Unauthenticated);
    }
    if identity.is_admin() {
        return Decision::Allow;
    }
    match identity.email() {
        Some(email) if same_email(email, created_by) && !same_email(email, requested_by) => {
            Decision::Allow
        }
        _ => Decision::Deny(DenyReason::Forbidden),
    }
}

/// Parse a reviewer's verdict. Only terminal values are verdicts.
pub fn parse_review(raw: &str) -> Result<ModificationStatus, CoreError> {
    let status: ModificationStatus = raw.parse()?;
    if status == ModificationStatus::Pending {
        return Err(CoreError::Validation(
            "Review must be APPROVED or REJECTED".into(),
        ));
    }
    Ok(status)
}

/// Validate a verdict against the modification's current status.
pub fn plan_review(
    current: ModificationStatus,
    requested: ModificationStatus,
) -> Result<Transition, CoreError> {
    plan_terminal_decision(
        "Modification request",
        current,
        ModificationStatus::Pending,
        requested,
    )
}
