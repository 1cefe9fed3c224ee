pub mod admin_auth;
pub mod applications;
pub mod modifications;
pub mod projects;
pub mod stats;
pub mod tasks;
pub mod users;
