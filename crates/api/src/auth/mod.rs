//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 token issue and validation (bearer tokens and the admin
//!   session cookie share one secret).
//! - [`access_code`] -- Argon2id verification of the admin access code.
//! - [`identity`] -- turns request headers into an [`Identity`].
//! - [`cookie`] -- the admin session cookie.
//!
//! [`Identity`]: crewboard_core::identity::Identity

pub mod access_code;
pub mod cookie;
pub mod identity;
pub mod jwt;
