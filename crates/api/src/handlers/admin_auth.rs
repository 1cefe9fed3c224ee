//! Handlers for the admin code exchange (`/admin/auth`).
//!
//! A correct code sets the admin session cookie. Every attempt claims a slot
//! per client key before the code is checked, and a success clears them.
//! Once the ceiling is hit every attempt is refused until the window
//! passes, whether or not the code is right.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use crewboard_core::error::CoreError;
use crewboard_core::identity::Identity;
use serde::{Deserialize, Serialize};

use crate::auth::access_code::verify_access_code;
use crate::auth::cookie::{clear_cookie, session_cookie};
use crate::auth::jwt::issue_admin_session;
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::{Caller, ClientKey};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/auth/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    pub code: String,
}

/// Admin session state reported to the client.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub is_admin: bool,
    pub identity: Identity,
}

/// POST /api/v1/admin/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    ClientKey(key): ClientKey,
    ApiJson(input): ApiJson<VerifyCodeRequest>,
) -> AppResult<impl IntoResponse> {
    let admin = &state.config.admin;
    let hash = admin.access_code_hash.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Unavailable(
            "Admin code exchange is not configured".into(),
        ))
    })?;

    let remaining = match state.throttle.reserve(&key, Utc::now()).await {
        Ok(remaining) => remaining,
        Err(err) => {
            tracing::warn!(client = %key, "Admin code exchange refused: locked out");
            return Err(err.into());
        }
    };

    let valid = verify_access_code(input.code.trim(), hash)
        .map_err(|e| AppError::InternalError(format!("Access code verification error: {e}")))?;

    if !valid {
        tracing::warn!(client = %key, remaining, "Admin code exchange failed");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid access code".into(),
        )));
    }

    state.throttle.record_success(&key).await?;

    let token = issue_admin_session(Duration::hours(admin.session_hours), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(client = %key, "Admin session issued");

    Ok((
        [(SET_COOKIE, session_cookie(&token, admin))],
        Json(
            DataResponse::new(SessionStatus {
                is_admin: true,
                identity: Identity::Admin { email: None },
            })
            .with_message("Admin access granted"),
        ),
    ))
}

/// POST /api/v1/admin/auth/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_cookie(&state.config.admin))],
        Json(
            DataResponse::new(SessionStatus {
                is_admin: false,
                identity: Identity::Anonymous,
            })
            .with_message("Signed out"),
        ),
    )
}

/// GET /api/v1/admin/auth/session
pub async fn session(Caller(identity): Caller) -> Json<DataResponse<SessionStatus>> {
    Json(DataResponse::new(SessionStatus {
        is_admin: identity.is_admin(),
        identity,
    }))
}
