//! Project status lifecycle.
//!
//! Projects only move forward: `COMING_SOON -> OPEN -> IN_PROGRESS ->
//! COMPLETED`. Skipping ahead is allowed, going back is not, and
//! `COMPLETED` is terminal. Applications are only accepted while `OPEN`.

use crate::error::CoreError;
use crate::lifecycle::{define_wire_enum, require_text, Transition};

define_wire_enum! {
    /// Project lifecycle status.
    ProjectStatus ("project status") {
        ComingSoon => "COMING_SOON",
        Open => "OPEN",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
    }
}

/// Maximum project name length in characters.
pub const MAX_NAME_LEN: usize = 200;

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::ComingSoon
    }
}

impl ProjectStatus {
    fn rank(self) -> u8 {
        match self {
            ProjectStatus::ComingSoon => 0,
            ProjectStatus::Open => 1,
            ProjectStatus::InProgress => 2,
            ProjectStatus::Completed => 3,
        }
    }

    /// Whether new applications may be created in this state.
    pub fn accepts_applications(self) -> bool {
        self == ProjectStatus::Open
    }
}

/// Validate a project status change.
pub fn plan_transition(from: ProjectStatus, to: ProjectStatus) -> Result<Transition, CoreError> {
    if from == to {
        return Ok(Transition::Unchanged);
    }
    if to.rank() < from.rank() {
        return Err(CoreError::InvalidState(format!(
            "Project cannot move from {from} back to {to}"
        )));
    }
    Ok(Transition::Apply)
}

/// Fail unless the project is open for applications.
pub fn ensure_accepting_applications(status: ProjectStatus) -> Result<(), CoreError> {
    if status.accepts_applications() {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Project is not accepting applications (status: {status})"
        )))
    }
}

/// Validate a project name for creation.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    require_text("name", name)?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}
