//! Repository for the `tasks` table.

use crewboard_core::task::{SubmissionStatus, TaskStatus};
use crewboard_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskSubmission, TaskWithProject, UNKNOWN_PROJECT_NAME};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_email, created_by, title, description, \
                       deliverables, platform, deadline, priority, status, submission, \
                       created_at, updated_at";

/// Task columns qualified for the project join.
const JOINED_COLUMNS: &str = "t.id, t.project_id, t.user_email, t.created_by, t.title, \
                              t.description, t.deliverables, t.platform, t.deadline, \
                              t.priority, t.status, t.submission, t.created_at, t.updated_at";

/// Provides lookup and lifecycle writes for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new `PENDING` task, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, user_email, created_by, title, description,
                                deliverables, platform, deadline, priority, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.user_email)
            .bind(&input.created_by)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.deliverables)
            .bind(&input.platform)
            .bind(input.deadline)
            .bind(input.priority.as_str())
            .bind(TaskStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID, regardless of assignee.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task by (id, project) regardless of assignee. Admin lookups.
    pub async fn find_in_project(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task by the full (id, project, assignee) triple.
    ///
    /// A task that exists but belongs to someone else yields `None`, exactly
    /// like a task that does not exist.
    pub async fn find_for_assignee(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        user_email: &str,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE id = $1 AND project_id = $2 AND user_email = $3"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .bind(user_email)
            .fetch_optional(pool)
            .await
    }

    /// List tasks assigned to `user_email`, soonest deadline first.
    ///
    /// Tasks whose project no longer resolves carry a placeholder name.
    pub async fn list_for_assignee(
        pool: &PgPool,
        user_email: &str,
        project_id: Option<DbId>,
    ) -> Result<Vec<TaskWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, COALESCE(p.name, $3) AS project_name
             FROM tasks t LEFT JOIN projects p ON p.id = t.project_id
             WHERE t.user_email = $1 AND ($2::BIGINT IS NULL OR t.project_id = $2)
             ORDER BY t.deadline ASC, t.id ASC"
        );
        sqlx::query_as::<_, TaskWithProject>(&query)
            .bind(user_email)
            .bind(project_id)
            .bind(UNKNOWN_PROJECT_NAME)
            .fetch_all(pool)
            .await
    }

    /// Move a task from `from` to `to`, conditional on the status still
    /// being `from`.
    ///
    /// Completion is also refused while a submission is pending, so a
    /// submission landing after the caller's read still goes to review.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET status = $3
             WHERE id = $1 AND status = $2
               AND ($3 <> $4 OR submission IS NULL OR submission->>'status' <> $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(TaskStatus::Completed.as_str())
            .bind(SubmissionStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Store a new submission and set the resulting task status.
    ///
    /// Only succeeds while the task is still in `from` and has no submission
    /// or a rejected one, so two racing submissions cannot both land.
    pub async fn submit(
        pool: &PgPool,
        id: DbId,
        from: TaskStatus,
        to: TaskStatus,
        submission: &TaskSubmission,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET status = $3, submission = $4
             WHERE id = $1 AND status = $2
               AND (submission IS NULL OR submission->>'status' = $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(Json(submission))
            .bind(SubmissionStatus::Rejected.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Record the verdict on a pending submission and set the resulting
    /// task status.
    pub async fn review_submission(
        pool: &PgPool,
        id: DbId,
        from: TaskStatus,
        to: TaskStatus,
        submission: &TaskSubmission,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET status = $3, submission = $4
             WHERE id = $1 AND status = $2 AND submission->>'status' = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(Json(submission))
            .bind(SubmissionStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }
}
