//! Token revocation — the `revoked_tokens` table keyed by JWT `jti`.

use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::RevokedToken;

/// Record a token's `jti` as revoked.
pub async fn revoke_token(pool: &PgPool, jti: &str) -> Result<RevokedToken, AuthError> {
    let (id, jti) = sqlx::query_as::<_, (i32, Option<String>)>(
        "INSERT INTO revoked_tokens (jti) VALUES ($1) RETURNING id, jti",
    )
    .bind(jti)
    .fetch_one(pool)
    .await?;
    Ok(RevokedToken { id, jti })
}

/// Whether a token's `jti` has been revoked.
pub async fn is_token_revoked(pool: &PgPool, jti: &str) -> Result<bool, AuthError> {
    let revoked = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)",
    )
    .bind(jti)
    .fetch_one(pool)
    .await?;
    Ok(revoked)
}
