//! Role-based access control (RBAC) extractors.
//!
//! Each extractor resolves the [`Caller`] and runs it through the
//! authorization gate, so a handler that takes one of these never runs for
//! a caller without the required role.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use crewboard_core::authz::{require, RequiredRole};
use crewboard_core::error::CoreError;
use crewboard_core::identity::Identity;

use super::auth::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an admin. 401 for anonymous callers, 403 for users.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Identity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Caller(identity) = Caller::from_request_parts(parts, state).await?;
        require(&RequiredRole::AdminOnly, &identity)?;
        Ok(RequireAdmin(identity))
    }
}

/// Requires any authenticated caller, admins included.
pub struct RequireAuth(pub Identity);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Caller(identity) = Caller::from_request_parts(parts, state).await?;
        require(&RequiredRole::AnyUser, &identity)?;
        Ok(RequireAuth(identity))
    }
}

/// Requires an authenticated caller that has an email to act as.
///
/// Admin sessions from the code exchange have no email and are refused
/// with 403 on self-scoped routes.
pub struct RequireUser {
    pub identity: Identity,
    pub email: String,
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(identity) = RequireAuth::from_request_parts(parts, state).await?;
        let email = identity.email().map(str::to_string).ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "This action requires a user account with an email".into(),
            ))
        })?;
        Ok(RequireUser { identity, email })
    }
}
