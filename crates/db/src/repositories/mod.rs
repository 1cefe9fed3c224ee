//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod project_repo;
pub mod stats_repo;
pub mod task_modification_repo;
pub mod task_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use project_repo::ProjectRepo;
pub use stats_repo::StatsRepo;
pub use task_modification_repo::TaskModificationRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
