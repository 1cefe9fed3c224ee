//! Domain layer for the Crewboard collaboration backend.
//!
//! Holds the error taxonomy, wire-exact status enums, caller identity and
//! the authorization gate, plus the pure transition rules for every
//! lifecycle (projects, applications, tasks, task modifications). Nothing
//! here touches the database; repositories live in `crewboard-db` and the
//! HTTP surface in `crewboard-api`.

pub mod application;
pub mod authz;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod project;
pub mod task;
pub mod task_modification;
pub mod throttle;
pub mod types;
