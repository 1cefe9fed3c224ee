//! Task entity model and DTOs.

use crewboard_core::task::{SubmissionStatus, TaskPriority, TaskStatus};
use crewboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// Placeholder shown when a task's project no longer resolves.
pub const UNKNOWN_PROJECT_NAME: &str = "Unknown project";

/// The assignee's work submission, stored as JSONB on the task row so that
/// submitting and reviewing are single-row updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSubmission {
    pub link: String,
    pub description: String,
    pub status: SubmissionStatus,
    pub submitted_at: Timestamp,
    pub feedback: Option<String>,
    pub last_updated: Timestamp,
}

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub user_email: String,
    pub created_by: String,
    pub title: String,
    pub description: String,
    pub deliverables: Option<String>,
    pub platform: Option<String>,
    pub deadline: Timestamp,
    #[sqlx(try_from = "String")]
    pub priority: TaskPriority,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub submission: Option<Json<TaskSubmission>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// Status of the current submission, if any.
    pub fn submission_status(&self) -> Option<SubmissionStatus> {
        self.submission.as_ref().map(|s| s.status)
    }
}

/// A task joined with its project's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskWithProject {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub task: Task,
    pub project_name: String,
}

/// Request body for `POST /projects/{id}/tasks`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(email)]
    pub user_email: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: String,
    pub deliverables: Option<String>,
    pub platform: Option<String>,
    pub deadline: Timestamp,
    /// Defaults to `MEDIUM`.
    pub priority: Option<String>,
}

/// Insert payload built by the handler.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub project_id: DbId,
    pub user_email: String,
    pub created_by: String,
    pub title: String,
    pub description: String,
    pub deliverables: Option<String>,
    pub platform: Option<String>,
    pub deadline: Timestamp,
    pub priority: TaskPriority,
}

/// Request body for `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskStatus {
    pub status: String,
}

/// Request body for `PUT /tasks/{id}/submission`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitWork {
    pub link: String,
    pub description: String,
}

/// Request body for `PATCH /admin/tasks/{id}/submission`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSubmission {
    pub status: String,
    pub feedback: Option<String>,
}

/// Query parameters for `GET /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListParams {
    pub project_id: Option<DbId>,
}
