//! Route definitions for the `/admin` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{admin_auth, applications, tasks, users};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /auth/verify              -> admin_auth::verify
/// POST   /auth/logout              -> admin_auth::logout
/// GET    /auth/session             -> admin_auth::session
/// GET    /users                    -> users::list
/// GET    /applications             -> applications::list_for_review
/// PATCH  /applications/{id}        -> applications::decide
/// PATCH  /tasks/{id}/submission    -> tasks::review_submission
/// ```
pub fn router() -> Router<AppState> {
    let auth_routes = Router::new()
        .route("/verify", post(admin_auth::verify))
        .route("/logout", post(admin_auth::logout))
        .route("/session", get(admin_auth::session));

    Router::new()
        .nest("/auth", auth_routes)
        .route("/users", get(users::list))
        .route("/applications", get(applications::list_for_review))
        .route("/applications/{id}", patch(applications::decide))
        .route("/tasks/{id}/submission", patch(tasks::review_submission))
}
