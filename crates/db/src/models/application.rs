//! Application entity model and DTOs.

use crewboard_core::application::ApplicationStatus;
use crewboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::project::ProjectSummary;

/// An application row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub project_id: DbId,
    pub user_email: String,
    pub answers: Vec<String>,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An application joined with its project's summary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationWithProject {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: Application,
    #[sqlx(flatten)]
    pub project: ProjectSummary,
}

/// Insert payload. Built by the handler from the caller identity and body.
#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub project_id: DbId,
    pub user_email: String,
    pub answers: Vec<String>,
}

/// Request body for `POST /projects/{id}/applications`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitApplication {
    pub answers: Vec<String>,
}

/// Request body for `PATCH /admin/applications/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DecideApplication {
    pub status: String,
}

/// Query parameters for the admin review queue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationListParams {
    pub status: Option<String>,
    pub project_id: Option<DbId>,
}
