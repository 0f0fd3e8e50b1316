//! Auth-related database queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::AuthError;
use crate::models::user::{User, UserRow, UserWithPassword};

/// (id, username, email, created_at, password_hash)
type CredentialRow = (i32, String, Option<String>, DateTime<Utc>, String);

/// Fetch a user and their password hash by username.
pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserWithPassword>, AuthError> {
    let row = sqlx::query_as::<_, CredentialRow>(
        "SELECT id, username, email, created_at, password_hash FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(
        |(id, username, email, created_at, password_hash)| UserWithPassword {
            user: User::from((id, username, email, created_at)),
            password_hash,
        },
    ))
}

/// Create a new user, returning the stored record.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: Option<&str>,
    password_hash: &str,
) -> Result<User, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) \
         RETURNING id, username, email, created_at",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;
    Ok(User::from(row))
}

/// Check whether a username is already registered.
pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}
