//! Handlers for user profiles.

use axum::extract::State;
use axum::Json;
use crewboard_core::error::CoreError;
use crewboard_db::models::user::{UpsertUser, User};
use crewboard_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::rbac::{RequireAdmin, RequireUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/users/me
///
/// Insert or update the caller's profile, keyed by the caller's email.
pub async fn upsert_me(
    State(state): State<AppState>,
    user: RequireUser,
    ApiJson(input): ApiJson<UpsertUser>,
) -> AppResult<Json<DataResponse<User>>> {
    input.validate()?;
    let saved = UserRepo::upsert(&state.pool, &user.email, &input).await?;
    tracing::info!(user_id = saved.id, email = %saved.email, "User profile saved");
    Ok(Json(DataResponse::new(saved)))
}

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    user: RequireUser,
) -> AppResult<Json<DataResponse<User>>> {
    let found = UserRepo::find_by_email(&state.pool, &user.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "User",
                key: user.email.clone(),
            })
        })?;
    Ok(Json(DataResponse::new(found)))
}

/// GET /api/v1/admin/users
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(users)))
}
