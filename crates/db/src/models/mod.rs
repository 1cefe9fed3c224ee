//! Row types and request DTOs, one module per table.

pub mod application;
pub mod project;
pub mod stats;
pub mod task;
pub mod task_modification;
pub mod user;
