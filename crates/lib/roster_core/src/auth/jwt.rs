//! JWT token generation and verification.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{info, warn};
use uuid::Uuid;

use super::AuthError;
use crate::models::auth::{TokenClaims, TokenKind};

/// Access token lifetime: 15 minutes.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 15 * 60;

/// Refresh token lifetime: 30 days.
pub const REFRESH_TOKEN_EXPIRY_SECS: i64 = 30 * 24 * 60 * 60;

impl TokenKind {
    /// Lifetime of a freshly issued token of this kind.
    pub fn lifetime(self) -> Duration {
        match self {
            TokenKind::Access => Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS),
            TokenKind::Refresh => Duration::seconds(REFRESH_TOKEN_EXPIRY_SECS),
        }
    }
}

/// Generate a signed HS256 token of the given kind with its default lifetime.
pub fn generate_token(user_id: i32, kind: TokenKind, secret: &[u8]) -> Result<String, AuthError> {
    generate_token_with_lifetime(user_id, kind, kind.lifetime(), secret)
}

/// Generate a signed HS256 token with an explicit lifetime.
///
/// Every token gets a fresh random `jti`.
pub fn generate_token_with_lifetime(
    user_id: i32,
    kind: TokenKind,
    lifetime: Duration,
    secret: &[u8],
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        jti: Uuid::new_v4().to_string(),
        kind,
        exp: (now + lifetime).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a JWT's signature and expiry, returning the claims on success.
///
/// Does not check the token kind or revocation.
pub fn verify_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

/// Environment variables consulted for the signing secret, in order.
const SECRET_ENV_VARS: [&str; 2] = ["JWT_SECRET", "AUTH_SECRET"];

/// Resolve the JWT secret: `JWT_SECRET` → `AUTH_SECRET` → the secret file
/// under the user data dir (created on first use).
pub fn resolve_jwt_secret() -> String {
    SECRET_ENV_VARS
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| load_or_create_secret(&jwt_secret_path()))
}

/// Read a persisted secret from `path`, generating and writing a new one when
/// the file is missing or blank.
///
/// A write failure is logged and the fresh secret is still returned, so tokens
/// issued in this run stay valid until restart.
pub fn load_or_create_secret(path: &Path) -> String {
    let existing = std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(secret) = existing {
        return secret;
    }

    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    let written = match path.parent() {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
    .and_then(|()| std::fs::write(path, &secret));
    match written {
        Ok(()) => info!(path = %path.display(), "generated new JWT secret"),
        Err(e) => warn!(path = %path.display(), "could not persist JWT secret: {e}"),
    }
    secret
}

/// `<data dir>/roster/jwt-secret`, falling back to the working directory.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("roster")
        .join("jwt-secret")
}
