//! Dashboard count payloads.

use serde::Serialize;

/// Platform-wide counts. Each count is read independently, so the numbers
/// are not a consistent snapshot of a single instant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlatformStats {
    pub total_projects: i64,
    pub open_projects: i64,
    pub total_tasks: i64,
    pub pending_applications: i64,
    pub active_users: i64,
}

/// Counts scoped to the calling user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CallerStats {
    pub active_applications: i64,
    pub completed_tasks: i64,
}
