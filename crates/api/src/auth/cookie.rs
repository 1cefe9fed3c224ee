//! The admin session cookie.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

use crate::config::AdminAuthConfig;

/// Name of the cookie carrying the signed admin session token.
pub const ADMIN_COOKIE_NAME: &str = "crewboard_admin_session";

/// Find a cookie's value across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value installing the admin session token.
pub fn session_cookie(token: &str, config: &AdminAuthConfig) -> String {
    let max_age = config.session_hours * 3600;
    with_secure(
        format!("{ADMIN_COOKIE_NAME}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age}"),
        config.cookie_secure,
    )
}

/// `Set-Cookie` value that expires the admin session cookie.
pub fn clear_cookie(config: &AdminAuthConfig) -> String {
    with_secure(
        format!("{ADMIN_COOKIE_NAME}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0"),
        config.cookie_secure,
    )
}

fn with_secure(cookie: String, secure: bool) -> String {
    if secure {
        format!("{cookie}; Secure")
    } else {
        cookie
    }
}
