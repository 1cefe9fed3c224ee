//! Identity resolution from request headers.
//!
//! Order of precedence:
//!
//! 1. A valid admin session cookie resolves to [`Identity::Admin`].
//! 2. A bearer token that validates as a JWT classifies by its role claim.
//! 3. A bearer that is a plausible email (when enabled) is a plain user.
//!    A raw email never yields an admin.
//! 4. Anything else is [`Identity::Anonymous`].
//!
//! Resolution never fails; a bad credential is simply no credential.

use std::net::SocketAddr;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use crewboard_core::identity::{normalize_email, Identity, ROLE_ADMIN};

use crate::auth::cookie::{read_cookie, ADMIN_COOKIE_NAME};
use crate::auth::jwt::validate_token;
use crate::config::ServerConfig;

/// Header appended by a trusted reverse proxy.
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Classify the caller behind `headers`.
pub fn resolve(headers: &HeaderMap, config: &ServerConfig) -> Identity {
    if let Some(identity) = read_cookie(headers, ADMIN_COOKIE_NAME)
        .and_then(|token| admin_from_session(token, config))
    {
        return identity;
    }

    match bearer_token(headers) {
        Some(token) => from_bearer(token, config),
        None => Identity::Anonymous,
    }
}

/// Classify a bearer credential.
pub fn from_bearer(token: &str, config: &ServerConfig) -> Identity {
    if let Ok(claims) = validate_token(token, &config.jwt) {
        return Identity::from_claims(&claims.role, &claims.sub);
    }

    if config.allow_raw_email_bearer && token.contains('@') {
        if let Some(email) = normalize_email(token) {
            return Identity::User { email };
        }
    }

    Identity::Anonymous
}

fn admin_from_session(token: &str, config: &ServerConfig) -> Option<Identity> {
    let claims = validate_token(token, &config.jwt).ok()?;
    (claims.role == ROLE_ADMIN).then(|| Identity::from_claims(&claims.role, &claims.sub))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Network key for the caller.
///
/// The socket peer address is authoritative. `X-Forwarded-For` is client
/// supplied, so it is read only when `trust_forwarded_for` is set, and then
/// only its last hop: the address the trusted proxy itself appended.
pub fn client_key(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> String {
    let forwarded = trust_forwarded_for
        .then(|| last_forwarded_hop(headers))
        .flatten();

    forwarded
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

fn last_forwarded_hop(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(FORWARDED_FOR)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .last()
        .map(str::to_string)
}
