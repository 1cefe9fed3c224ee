//! Project entity model and DTOs.

use crewboard_core::project::ProjectStatus;
use crewboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal project view joined onto applications.
///
/// Column names are prefixed so the summary can be flattened into joined rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    #[sqlx(rename = "project_id")]
    pub id: DbId,
    #[sqlx(rename = "project_name")]
    pub name: String,
    #[sqlx(rename = "project_status", try_from = "String")]
    pub status: ProjectStatus,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `COMING_SOON` if omitted. Parsed by the handler so an
    /// unknown value is a validation error rather than a body rejection.
    pub status: Option<String>,
}

/// DTO for `PATCH /projects/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetProjectStatus {
    pub status: String,
}

/// Query parameters for `GET /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<String>,
}
