//! Application lifecycle rules.
//!
//! An application is created `PENDING` and an admin moves it to `ACCEPTED`
//! or `REJECTED` exactly once. Re-sending the decision it already has is a
//! no-op; trying to flip a decided application is a conflict.

use crate::error::CoreError;
use crate::lifecycle::{define_wire_enum, plan_terminal_decision, Transition};

define_wire_enum! {
    /// Review status of an application.
    ApplicationStatus ("application status") {
        Pending => "PENDING",
        Accepted => "ACCEPTED",
        Rejected => "REJECTED",
    }
}

/// Maximum number of answers accepted on one application.
pub const MAX_ANSWERS: usize = 50;

/// Maximum length of a single answer in characters.
pub const MAX_ANSWER_LEN: usize = 5_000;

impl ApplicationStatus {
    pub fn is_terminal(self) -> bool {
        self != ApplicationStatus::Pending
    }
}

/// Validate the answers submitted with an application.
pub fn validate_answers(answers: &[String]) -> Result<(), CoreError> {
    if answers.is_empty() || answers.iter().all(|a| a.trim().is_empty()) {
        return Err(CoreError::Validation(
            "answers must contain at least one non-empty answer".into(),
        ));
    }
    if answers.len() > MAX_ANSWERS {
        return Err(CoreError::Validation(format!(
            "at most {MAX_ANSWERS} answers are allowed"
        )));
    }
    if answers.iter().any(|a| a.chars().count() > MAX_ANSWER_LEN) {
        return Err(CoreError::Validation(format!(
            "each answer must be at most {MAX_ANSWER_LEN} characters"
        )));
    }
    Ok(())
}

/// Parse the status an admin asked for. Only terminal values are decisions.
pub fn parse_decision(raw: &str) -> Result<ApplicationStatus, CoreError> {
    let status: ApplicationStatus = raw.parse()?;
    if !status.is_terminal() {
        return Err(CoreError::Validation(
            "Decision must be ACCEPTED or REJECTED".into(),
        ));
    }
    Ok(status)
}

/// Validate a decision against the application's current status.
pub fn plan_decision(
    current: ApplicationStatus,
    requested: ApplicationStatus,
) -> Result<Transition, CoreError> {
    plan_terminal_decision("Application", current, ApplicationStatus::Pending, requested)
}
