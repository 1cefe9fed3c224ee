pub mod admin;
pub mod health;
pub mod project;
pub mod task;
pub mod user;

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{applications, modifications, stats};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/auth/verify                        code exchange (POST, public)
/// /admin/auth/logout                        clear admin cookie (POST)
/// /admin/auth/session                       admin session status (GET)
/// /admin/users                              list users (admin)
/// /admin/applications                       review queue (admin)
/// /admin/applications/{id}                  decide (PATCH, admin)
/// /admin/tasks/{id}/submission              review submission (PATCH, admin)
///
/// /users/me                                 get, upsert own profile
///
/// /projects                                 list, create
/// /projects/{id}                            get
/// /projects/{id}/status                     set status (PATCH, admin)
/// /projects/{id}/applications               submit application (POST)
/// /projects/{id}/tasks                      create task (POST, admin)
/// /projects/{id}/tasks/{task_id}            get one task
///
/// /applications/mine                        own applications
///
/// /tasks                                    assigned tasks (?project_id=)
/// /tasks/{id}/status                        update status (PATCH)
/// /tasks/{id}/submission                    submit work (PUT)
/// /tasks/{id}/modifications                 list, request
///
/// /modifications/{id}                       review (PATCH)
///
/// /stats                                    dashboard counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin::router())
        .nest("/users", user::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .route("/applications/mine", get(applications::list_mine))
        .route("/modifications/{id}", patch(modifications::review))
        .route("/stats", get(stats::get))
}
