//! User domain models.
//!
//! These are internal domain models, distinct from the API wire models
//! (which use camelCase and omit credentials).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain user, as stored in the `users` table minus credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User with password hash (for internal auth flows).
#[derive(Debug, Clone)]
pub struct UserWithPassword {
    pub user: User,
    pub password_hash: String,
}

/// Row shape shared by the user queries: (id, username, email, created_at).
pub(crate) type UserRow = (i32, String, Option<String>, DateTime<Utc>);

impl From<UserRow> for User {
    fn from((id, username, email, created_at): UserRow) -> Self {
        Self {
            id,
            username,
            email,
            created_at,
        }
    }
}
