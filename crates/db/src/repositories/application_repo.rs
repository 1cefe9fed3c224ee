//! Repository for the `applications` table.

use crewboard_core::application::ApplicationStatus;
use crewboard_core::project::ProjectStatus;
use crewboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::{Application, ApplicationWithProject, CreateApplication};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_email, answers, status, created_at, updated_at";

/// Application columns qualified for the project join.
const JOINED_COLUMNS: &str = "a.id, a.project_id, a.user_email, a.answers, a.status, \
                              a.created_at, a.updated_at, \
                              p.name AS project_name, p.status AS project_status";

/// Name of the partial unique index guarding one PENDING application per
/// (project, user).
pub const PENDING_UNIQUE_INDEX: &str = "uq_applications_pending";

/// Provides create/decide/list operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new `PENDING` application while its project is `OPEN`.
    ///
    /// The project status is checked by the insert itself, so a project
    /// closed concurrently admits nothing. Returns `None` when the project
    /// is missing or not open. A second pending application for the same
    /// (project, user) fails with a unique violation on
    /// [`PENDING_UNIQUE_INDEX`].
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications (project_id, user_email, answers, status)
             SELECT p.id, $2, $3, $4 FROM projects p
             WHERE p.id = $1 AND p.status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(input.project_id)
            .bind(&input.user_email)
            .bind(&input.answers)
            .bind(ApplicationStatus::Pending.as_str())
            .bind(ProjectStatus::Open.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Find an application by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an application joined with its project summary.
    pub async fn find_with_project(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ApplicationWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM applications a JOIN projects p ON p.id = a.project_id
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, ApplicationWithProject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a `PENDING` application to `status`.
    ///
    /// Returns `None` when the application does not exist or is no longer
    /// pending; the caller re-reads to tell the two apart.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET status = $2
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(ApplicationStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List a user's applications, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_email: &str,
    ) -> Result<Vec<ApplicationWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM applications a JOIN projects p ON p.id = a.project_id
             WHERE a.user_email = $1
             ORDER BY a.created_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, ApplicationWithProject>(&query)
            .bind(user_email)
            .fetch_all(pool)
            .await
    }

    /// List applications for review, optionally filtered by status and project.
    pub async fn list(
        pool: &PgPool,
        status: Option<ApplicationStatus>,
        project_id: Option<DbId>,
    ) -> Result<Vec<ApplicationWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM applications a JOIN projects p ON p.id = a.project_id
             WHERE ($1::TEXT IS NULL OR a.status = $1)
               AND ($2::BIGINT IS NULL OR a.project_id = $2)
             ORDER BY a.created_at ASC, a.id ASC"
        );
        sqlx::query_as::<_, ApplicationWithProject>(&query)
            .bind(status.map(ApplicationStatus::as_str))
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
