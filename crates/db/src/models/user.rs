//! User entity model and DTOs.

use crewboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user row from the `users` table. Profile fields are opaque to the
/// lifecycle rules; only `email` and `is_active` are ever interpreted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub profile: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `PUT /users/me`. The email always comes from the caller identity.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpsertUser {
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
    pub profile: Option<serde_json::Value>,
}
