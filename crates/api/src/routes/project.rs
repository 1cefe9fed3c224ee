//! Route definitions for the `/projects` resource.
//!
//! Also mounts the project-scoped application and task routes.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{applications, projects, tasks};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PATCH  /{id}/status               -> set_status
/// POST   /{id}/applications         -> applications::submit
/// POST   /{id}/tasks                -> tasks::create
/// GET    /{id}/tasks/{task_id}      -> tasks::get_one
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route("/{id}", get(projects::get_by_id))
        .route("/{id}/status", patch(projects::set_status))
        .route("/{id}/applications", post(applications::submit))
        .route("/{id}/tasks", post(tasks::create))
        .route("/{id}/tasks/{task_id}", get(tasks::get_one))
}
