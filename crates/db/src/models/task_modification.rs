//! Task modification (change request) model and DTOs.

use crewboard_core::task_modification::{ModificationStatus, ProposedChanges};
use crewboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `task_modifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskModification {
    pub id: DbId,
    pub task_id: DbId,
    pub proposed_changes: Json<ProposedChanges>,
    pub comments: Option<String>,
    pub requested_by: String,
    #[sqlx(try_from = "String")]
    pub status: ModificationStatus,
    pub reviewed_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /tasks/{id}/modifications`.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestModification {
    pub proposed_changes: ProposedChanges,
    pub comments: Option<String>,
}

/// Insert payload built by the handler.
#[derive(Debug, Clone)]
pub struct CreateTaskModification {
    pub task_id: DbId,
    pub proposed_changes: ProposedChanges,
    pub comments: Option<String>,
    pub requested_by: String,
}

/// Request body for `PATCH /modifications/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewModification {
    pub status: String,
}
