//! Task lifecycle rules: status progression, work submission and the
//! admin review of a submission.
//!
//! Task status only moves forward (`PENDING -> IN_PROGRESS -> COMPLETED`).
//! A submission starts `PENDING`; an admin approves it (which completes the
//! task) or rejects it with feedback, after which the assignee may submit
//! again.

use crate::error::CoreError;
use crate::lifecycle::{define_wire_enum, plan_terminal_decision, require_text, Transition};

define_wire_enum! {
    /// Task progress status.
    TaskStatus ("task status") {
        Pending => "PENDING",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
    }
}

define_wire_enum! {
    /// Task priority. Fixed at creation.
    TaskPriority ("task priority") {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
}

define_wire_enum! {
    /// Review status of a work submission.
    SubmissionStatus ("submission status") {
        Pending => "PENDING",
        Approved => "APPROVED",
        Rejected => "REJECTED",
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl TaskStatus {
    fn rank(self) -> u8 {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
        }
    }
}

/// Validate a task status change requested by the assignee or an admin.
///
/// A task whose submission awaits review cannot be completed directly; the
/// review decides.
pub fn plan_status_change(
    current: TaskStatus,
    requested: TaskStatus,
    submission: Option<SubmissionStatus>,
) -> Result<Transition, CoreError> {
    if current == requested {
        return Ok(Transition::Unchanged);
    }
    if current == TaskStatus::Completed {
        return Err(CoreError::InvalidState("Task is already COMPLETED".into()));
    }
    if requested.rank() < current.rank() {
        return Err(CoreError::InvalidState(format!(
            "Task cannot move from {current} back to {requested}"
        )));
    }
    if requested == TaskStatus::Completed && submission == Some(SubmissionStatus::Pending) {
        return Err(CoreError::InvalidState(
            "Task has a submission awaiting review".into(),
        ));
    }
    Ok(Transition::Apply)
}

/// Validate the required text fields of a new task.
pub fn validate_new_task(title: &str, description: &str) -> Result<(), CoreError> {
    require_text("title", title)?;
    require_text("description", description)
}

/// Validate a work submission payload.
pub fn validate_submission(link: &str, description: &str) -> Result<(), CoreError> {
    require_text("link", link)?;
    let trimmed = link.trim();
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(CoreError::Validation(
            "link must be an http(s) URL".into(),
        ));
    }
    require_text("description", description)
}

/// Fail unless the task can take a (new) submission.
///
/// A rejected submission may be replaced; a pending or approved one may not.
pub fn ensure_can_submit(
    status: TaskStatus,
    submission: Option<SubmissionStatus>,
) -> Result<(), CoreError> {
    if status == TaskStatus::Completed {
        return Err(CoreError::InvalidState("Task is already COMPLETED".into()));
    }
    match submission {
        Some(SubmissionStatus::Pending) => Err(CoreError::InvalidState(
            "A submission is already awaiting review".into(),
        )),
        Some(SubmissionStatus::Approved) => Err(CoreError::InvalidState(
            "Submission has already been APPROVED".into(),
        )),
        Some(SubmissionStatus::Rejected) | None => Ok(()),
    }
}

/// Task status once work has been submitted.
pub fn status_after_submission(current: TaskStatus) -> TaskStatus {
    match current {
        TaskStatus::Pending => TaskStatus::InProgress,
        other => other,
    }
}

/// Parse an admin's review verdict. Only terminal values are verdicts.
pub fn parse_review(raw: &str) -> Result<SubmissionStatus, CoreError> {
    let status: SubmissionStatus = raw.parse()?;
    if status == SubmissionStatus::Pending {
        return Err(CoreError::Validation(
            "Review must be APPROVED or REJECTED".into(),
        ));
    }
    Ok(status)
}

/// Validate a submission review against the task and its current
/// submission. Re-sending the recorded verdict stays a no-op even once the
/// task is completed.
pub fn plan_submission_review(
    task: TaskStatus,
    current: Option<SubmissionStatus>,
    requested: SubmissionStatus,
) -> Result<Transition, CoreError> {
    let current = current
        .ok_or_else(|| CoreError::InvalidState("Task has no submission to review".into()))?;
    let transition =
        plan_terminal_decision("Submission", current, SubmissionStatus::Pending, requested)?;
    if transition == Transition::Apply && task == TaskStatus::Completed {
        return Err(CoreError::InvalidState("Task is already COMPLETED".into()));
    }
    Ok(transition)
}

/// Task status after a submission verdict.
pub fn status_after_review(current: TaskStatus, verdict: SubmissionStatus) -> TaskStatus {
    match verdict {
        SubmissionStatus::Approved => TaskStatus::Completed,
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_match_creation_rules() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn priority_wire_strings() {
        assert_eq!("LOW".parse::<TaskPriority>().unwrap(), TaskPriority::Low);
        assert_eq!(TaskPriority::High.as_str(), "HIGH");
        assert!("URGENT".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn status_moves_forward() {
        assert_eq!(
            plan_status_change(TaskStatus::Pending, TaskStatus::InProgress, None).unwrap(),
            Transition::Apply
        );
        assert_eq!(
            plan_status_change(TaskStatus::Pending, TaskStatus::Completed, None).unwrap(),
            Transition::Apply
        );
    }

    #[test]
    fn status_never_regresses() {
        assert_matches!(
            plan_status_change(TaskStatus::InProgress, TaskStatus::Pending, None),
            Err(CoreError::InvalidState(_))
        );
        assert_matches!(
            plan_status_change(TaskStatus::Completed, TaskStatus::InProgress, None),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn same_status_is_unchanged() {
        assert_eq!(
            plan_status_change(TaskStatus::Completed, TaskStatus::Completed, None).unwrap(),
            Transition::Unchanged
        );
    }

    #[test]
    fn submission_link_must_be_http() {
        assert!(validate_submission("https://github.com/x/y/pull/1", "done").is_ok());
        assert_matches!(
            validate_submission("ftp://example.com", "done"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_submission("https://example.com", " "),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn completed_task_takes_no_submission() {
        assert_matches!(
            ensure_can_submit(TaskStatus::Completed, None),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn rejected_submission_can_be_replaced() {
        assert!(ensure_can_submit(TaskStatus::InProgress, Some(SubmissionStatus::Rejected)).is_ok());
        assert_matches!(
            ensure_can_submit(TaskStatus::InProgress, Some(SubmissionStatus::Pending)),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn submitting_starts_pending_task() {
        assert_eq!(status_after_submission(TaskStatus::Pending), TaskStatus::InProgress);
        assert_eq!(status_after_submission(TaskStatus::InProgress), TaskStatus::InProgress);
    }

    #[test]
    fn review_requires_a_submission() {
        assert_matches!(
            plan_submission_review(TaskStatus::InProgress, None, SubmissionStatus::Approved),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn approval_completes_task() {
        assert_eq!(
            plan_submission_review(
                TaskStatus::InProgress,
                Some(SubmissionStatus::Pending),
                SubmissionStatus::Approved
            )
            .unwrap(),
            Transition::Apply
        );
        assert_eq!(
            status_after_review(TaskStatus::InProgress, SubmissionStatus::Approved),
            TaskStatus::Completed
        );
        assert_eq!(
            status_after_review(TaskStatus::InProgress, SubmissionStatus::Rejected),
            TaskStatus::InProgress
        );
    }

    #[test]
    fn pending_is_not_a_verdict() {
        assert_matches!(parse_review("PENDING"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn pending_submission_blocks_completion() {
        assert_matches!(
            plan_status_change(
                TaskStatus::InProgress,
                TaskStatus::Completed,
                Some(SubmissionStatus::Pending)
            ),
            Err(CoreError::InvalidState(_))
        );
        assert_eq!(
            plan_status_change(
                TaskStatus::InProgress,
                TaskStatus::Completed,
                Some(SubmissionStatus::Rejected)
            )
            .unwrap(),
            Transition::Apply
        );
    }

    #[test]
    fn completed_task_takes_no_new_verdict() {
        assert_matches!(
            plan_submission_review(
                TaskStatus::Completed,
                Some(SubmissionStatus::Pending),
                SubmissionStatus::Rejected
            ),
            Err(CoreError::InvalidState(_))
        );
        // The recorded verdict can still be re-sent.
        assert_eq!(
            plan_submission_review(
                TaskStatus::Completed,
                Some(SubmissionStatus::Approved),
                SubmissionStatus::Approved
            )
            .unwrap(),
            Transition::Unchanged
        );
    }
}
