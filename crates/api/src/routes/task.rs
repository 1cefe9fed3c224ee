//! Route definitions for the `/tasks` resource.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::{modifications, tasks};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                        -> list_assigned
/// PATCH  /{id}/status             -> update_status
/// PUT    /{id}/submission         -> submit_work
/// GET    /{id}/modifications      -> modifications::list
/// POST   /{id}/modifications      -> modifications::request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list_assigned))
        .route("/{id}/status", patch(tasks::update_status))
        .route("/{id}/submission", put(tasks::submit_work))
        .route(
            "/{id}/modifications",
            get(modifications::list).post(modifications::request),
        )
}
