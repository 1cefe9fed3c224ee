use crewboard_db::DbConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except `JWT_SECRET` have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Token signing secret.
    pub jwt: JwtConfig,
    /// Accept a bare email as a bearer credential (default: `true`).
    pub allow_raw_email_bearer: bool,
    /// Key the admin code throttle on the last `X-Forwarded-For` hop
    /// instead of the socket peer (default: `false`). Enable only when every
    /// request arrives through a proxy that appends that header.
    pub trust_forwarded_for: bool,
    pub admin: AdminAuthConfig,
    /// Connection pool settings.
    pub db: DbConfig,
}

/// Settings for the admin code exchange and its session cookie.
#[derive(Debug, Clone)]
pub struct AdminAuthConfig {
    /// Argon2id PHC hash of the admin access code. `None` disables the
    /// exchange.
    pub access_code_hash: Option<String>,
    /// Mark the session cookie `Secure` (default: `true`).
    pub cookie_secure: bool,
    /// Session lifetime in hours (default: `24`).
    pub session_hours: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `ALLOW_RAW_EMAIL_BEARER` | `true`                     |
    /// | `TRUST_FORWARDED_FOR`    | `false`                    |
    /// | `ADMIN_ACCESS_CODE_HASH` | unset (exchange disabled)  |
    /// | `ADMIN_COOKIE_SECURE`    | `true`                     |
    /// | `ADMIN_SESSION_HOURS`    | `24`                       |
    ///
    /// `JWT_SECRET` is read by [`JwtConfig::from_env`] and the `DB_*` pool
    /// settings by [`DbConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let allow_raw_email_bearer = env_flag("ALLOW_RAW_EMAIL_BEARER", true);

        let access_code_hash = std::env::var("ADMIN_ACCESS_CODE_HASH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let session_hours: i64 = std::env::var("ADMIN_SESSION_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("ADMIN_SESSION_HOURS must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            allow_raw_email_bearer,
            trust_forwarded_for: env_flag("TRUST_FORWARDED_FOR", false),
            admin: AdminAuthConfig {
                access_code_hash,
                cookie_secure: env_flag("ADMIN_COOKIE_SECURE", true),
                session_hours,
            },
            db: DbConfig::from_env(),
        }
    }
}

/// Parse a boolean env var (`true`/`false`/`1`/`0`), falling back to `default`.
fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => panic!("{key} must be a boolean (true/false)"),
        },
        Err(_) => default,
    }
}

#[cfg(test)]
impl ServerConfig {
    /// Local-only configuration with the given signing secret.
    pub(crate) fn for_tests(secret: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout_secs: 30,
            jwt: JwtConfig {
                secret: secret.to_string(),
            },
            allow_raw_email_bearer: true,
            trust_forwarded_for: false,
            admin: AdminAuthConfig {
                access_code_hash: None,
                cookie_secure: false,
                session_hours: 24,
            },
            db: DbConfig::default(),
        }
    }
}
