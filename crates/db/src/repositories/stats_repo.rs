//! Read-only counts for the dashboard.
//!
//! Each method is one independent `COUNT(*)`; callers fan them out in
//! parallel and must not assume the results describe a single instant.

use crewboard_core::application::ApplicationStatus;
use crewboard_core::project::ProjectStatus;
use crewboard_core::task::TaskStatus;
use sqlx::PgPool;

/// Provides dashboard count queries.
pub struct StatsRepo;

impl StatsRepo {
    pub async fn count_projects(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn count_open_projects(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE status = $1")
            .bind(ProjectStatus::Open.as_str())
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn count_tasks(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn count_pending_applications(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM applications WHERE status = $1")
                .bind(ApplicationStatus::Pending.as_str())
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    pub async fn count_active_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_active")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// The caller's applications still awaiting a decision.
    pub async fn count_active_applications_for(pool: &PgPool, email: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM applications WHERE user_email = $1 AND status = $2",
        )
        .bind(email)
        .bind(ApplicationStatus::Pending.as_str())
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    pub async fn count_completed_tasks_for(pool: &PgPool, email: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_email = $1 AND status = $2")
                .bind(email)
                .bind(TaskStatus::Completed.as_str())
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
