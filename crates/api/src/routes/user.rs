use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /me    -> me
/// PUT    /me    -> upsert_me
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(users::me).put(users::upsert_me))
}
