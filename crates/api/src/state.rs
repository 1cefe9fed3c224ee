use std::sync::Arc;

use crewboard_core::throttle::AttemptThrottle;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: crewboard_db::DbPool,
    /// Server configuration (read by the identity extractors and handlers).
    pub config: Arc<ServerConfig>,
    /// Failed-attempt counter for the admin code exchange.
    pub throttle: AttemptThrottle,
}

impl AppState {
    pub fn new(pool: crewboard_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            throttle: AttemptThrottle::in_memory(),
        }
    }
}
