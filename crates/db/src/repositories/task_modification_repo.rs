//! Repository for the `task_modifications` table.

use crewboard_core::task_modification::{ModificationStatus, ProposedChanges};
use crewboard_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::task_modification::{CreateTaskModification, TaskModification};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, proposed_changes, comments, requested_by, status, \
                       reviewed_by, created_at, updated_at";

/// Provides request/review operations for task modifications.
pub struct TaskModificationRepo;

impl TaskModificationRepo {
    /// Insert a new `PENDING` modification request.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTaskModification,
    ) -> Result<TaskModification, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_modifications (task_id, proposed_changes, comments, requested_by, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskModification>(&query)
            .bind(input.task_id)
            .bind(Json(&input.proposed_changes))
            .bind(&input.comments)
            .bind(&input.requested_by)
            .bind(ModificationStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TaskModification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_modifications WHERE id = $1");
        sqlx::query_as::<_, TaskModification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a task's modification requests, oldest first.
    pub async fn list_for_task(pool: &PgPool, task_id: DbId) -> Result<Vec<TaskModification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_modifications
             WHERE task_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, TaskModification>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// Record the verdict on a `PENDING` request.
    ///
    /// On `APPROVED` the proposed fields are written to the task in the same
    /// transaction. Returns `None` (and writes nothing) if the request is no
    /// longer pending.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        status: ModificationStatus,
        reviewed_by: &str,
    ) -> Result<Option<TaskModification>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE task_modifications SET status = $2, reviewed_by = $3
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        let reviewed = sqlx::query_as::<_, TaskModification>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(reviewed_by)
            .bind(ModificationStatus::Pending.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(modification) = reviewed else {
            tx.rollback().await?;
            return Ok(None);
        };

        if status == ModificationStatus::Approved {
            apply_changes(&mut tx, modification.task_id, &modification.proposed_changes).await?;
        }

        tx.commit().await?;
        Ok(Some(modification))
    }
}

/// Write the non-`None` proposed fields onto the task.
async fn apply_changes(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    task_id: DbId,
    changes: &ProposedChanges,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE tasks SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            deliverables = COALESCE($4, deliverables),
            platform = COALESCE($5, platform)
         WHERE id = $1",
    )
    .bind(task_id)
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(&changes.deliverables)
    .bind(&changes.platform)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
