//! Dashboard counts.

use axum::extract::State;
use axum::Json;
use crewboard_db::models::stats::{CallerStats, PlatformStats};
use crewboard_db::repositories::StatsRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub platform: PlatformStats,
    /// Present when the caller has an email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<CallerStats>,
}

/// GET /api/v1/stats
///
/// Every count is an independent query run concurrently; the numbers are
/// not a consistent snapshot.
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> AppResult<Json<DataResponse<StatsResponse>>> {
    let pool = &state.pool;

    let (total_projects, open_projects, total_tasks, pending_applications, active_users) = tokio::try_join!(
        StatsRepo::count_projects(pool),
        StatsRepo::count_open_projects(pool),
        StatsRepo::count_tasks(pool),
        StatsRepo::count_pending_applications(pool),
        StatsRepo::count_active_users(pool),
    )?;

    let caller = match identity.email() {
        Some(email) => {
            let (active_applications, completed_tasks) = tokio::try_join!(
                StatsRepo::count_active_applications_for(pool, email),
                StatsRepo::count_completed_tasks_for(pool, email),
            )?;
            Some(CallerStats {
                active_applications,
                completed_tasks,
            })
        }
        None => None,
    };

    Ok(Json(DataResponse::new(StatsResponse {
        platform: PlatformStats {
            total_projects,
            open_projects,
            total_tasks,
            pending_applications,
            active_users,
        },
        caller,
    })))
}
