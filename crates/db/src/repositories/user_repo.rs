//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{UpsertUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, image, profile, is_active, created_at, updated_at";

/// Provides upsert and lookup operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert the user keyed by `email`, or update the existing row.
    ///
    /// Only non-`None` fields overwrite stored values on update.
    pub async fn upsert(pool: &PgPool, email: &str, input: &UpsertUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, name, image, profile)
             VALUES ($1, $2, $3, COALESCE($4, '{{}}'::jsonb))
             ON CONFLICT (email) DO UPDATE SET
                name = COALESCE(EXCLUDED.name, users.name),
                image = COALESCE(EXCLUDED.image, users.image),
                profile = CASE WHEN $4 IS NULL THEN users.profile ELSE EXCLUDED.profile END
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.profile)
            .fetch_one(pool)
            .await
    }

    /// Find a user by email (stored lower-cased).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }
}
