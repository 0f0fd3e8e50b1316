//! Database migration support.
//!
//! Embeds and runs the reversible SQL migrations from `roster_core/migrations/`.

use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use tracing::info;

/// All embedded migrations, ordered by version.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Version of the migration creating the `users` table.
pub const CREATE_USERS_VERSION: i64 = 20230701000000;

/// Version of the migration creating the `revoked_tokens` table.
pub const CREATE_REVOKED_TOKENS_VERSION: i64 = 20230717142241;

/// Run all pending embedded migrations against the given pool.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Revert every applied migration whose version is greater than `target`.
///
/// A `target` of 0 reverts everything.
pub async fn revert_to(pool: &PgPool, target: i64) -> Result<(), MigrateError> {
    info!(target, "reverting migrations");
    MIGRATOR.undo(pool, target).await
}

/// Revert the most recently applied migration.
///
/// Returns the reverted version, or `None` when nothing has been applied.
pub async fn revert_last(pool: &PgPool) -> Result<Option<i64>, MigrateError> {
    let Some(latest) = latest_applied_version(pool).await? else {
        return Ok(None);
    };
    revert_to(pool, preceding_version(latest)).await?;
    Ok(Some(latest))
}

/// Highest successfully applied migration version, if any.
pub async fn latest_applied_version(pool: &PgPool) -> Result<Option<i64>, MigrateError> {
    // The bookkeeping table only exists once `migrate` has run at least once.
    let tracked = sqlx::query_scalar::<_, bool>(
        "SELECT to_regclass('_sqlx_migrations') IS NOT NULL",
    )
    .fetch_one(pool)
    .await?;
    if !tracked {
        return Ok(None);
    }

    let version = sqlx::query_scalar::<_, Option<i64>>(
        "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(pool)
    .await?;
    Ok(version)
}

/// Version of the embedded migration directly before `version`, or 0.
pub fn preceding_version(version: i64) -> i64 {
    MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| m.version)
        .filter(|v| *v < version)
        .max()
        .unwrap_or(0)
}
