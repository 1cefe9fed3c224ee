//! Identity extractors for Axum handlers.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use crewboard_core::identity::Identity;

use crate::auth::identity::{client_key, resolve};
use crate::error::AppError;
use crate::state::AppState;

/// The caller's identity, resolved from the admin cookie or bearer token.
///
/// Never rejects: a missing or bad credential yields
/// [`Identity::Anonymous`]. Handlers that need more use the extractors in
/// [`rbac`](super::rbac) or call the authorization gate themselves.
///
/// ```ignore
/// async fn my_handler(Caller(identity): Caller) -> AppResult<Json<()>> {
///     tracing::info!(actor = identity.actor(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Caller(resolve(&parts.headers, &state.config)))
    }
}

/// Network key of the caller, used to key the admin code throttle.
#[derive(Debug, Clone)]
pub struct ClientKey(pub String);

impl FromRequestParts<AppState> for ClientKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientKey(client_key(
            &parts.headers,
            peer,
            state.config.trust_forwarded_for,
        )))
    }
}
