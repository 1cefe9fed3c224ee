//! Identity and authorization extractors.
//!
//! - [`auth::Caller`] -- the resolved identity (possibly anonymous).
//! - [`auth::ClientKey`] -- the caller's network key for throttling.
//! - [`rbac::RequireAuth`] -- any authenticated caller.
//! - [`rbac::RequireUser`] -- an authenticated caller with an email.
//! - [`rbac::RequireAdmin`] -- an admin.

pub mod auth;
pub mod rbac;
