//! Authentication service — register/login/refresh/logout flows delegating to
//! `roster_core::auth`.

use roster_core::auth::{AuthError, password, queries, revocation};
use roster_core::models::user::User;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{AccessTokenResponse, LogoutResponse, TokenResponse, UserView};

// Re-export from roster_core so the API crate has a single import point.
pub use roster_core::auth::jwt::{ACCESS_TOKEN_EXPIRY_SECS, resolve_jwt_secret, verify_token};
pub use roster_core::models::auth::{TokenClaims, TokenKind};

/// Longest username the `users` table accepts.
const MAX_USERNAME_LEN: usize = 80;

/// Longest email the `users` table accepts.
const MAX_EMAIL_LEN: usize = 120;

/// Issue an access + refresh token pair for a user.
fn issue_token_pair(user: User, jwt_secret: &[u8]) -> AppResult<TokenResponse> {
    let access_token =
        roster_core::auth::jwt::generate_token(user.id, TokenKind::Access, jwt_secret)?;
    let refresh_token =
        roster_core::auth::jwt::generate_token(user.id, TokenKind::Refresh, jwt_secret)?;
    Ok(TokenResponse {
        access_token,
        refresh_token,
        expires_in: ACCESS_TOKEN_EXPIRY_SECS,
        token_type: "Bearer".to_string(),
        user: UserView::from(user),
    })
}

/// Register a new user account and log them in.
pub async fn register(
    pool: &PgPool,
    username: &str,
    email: Option<&str>,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    let email = email.map(str::trim).filter(|e| !e.is_empty());
    if email.is_some_and(|e| e.chars().count() > MAX_EMAIL_LEN) {
        return Err(AppError::Validation(format!(
            "Email must be at most {MAX_EMAIL_LEN} characters"
        )));
    }
    password::validate_password(password)?;

    if queries::username_exists(pool, username).await? {
        return Err(AppError::Validation("Username already registered".into()));
    }

    let pw_hash = password::hash_password(password)?;
    let user = queries::create_user(pool, username, email, &pw_hash).await?;
    info!(user_id = user.id, username, "user registered");

    issue_token_pair(user, jwt_secret)
}

/// Authenticate with username + password.
pub async fn login(
    pool: &PgPool,
    username: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    // Usernames are stored trimmed; same error for unknown user and wrong password.
    let Some(record) = queries::find_user_by_username(pool, username.trim()).await? else {
        return Err(AuthError::CredentialError.into());
    };
    if !password::verify_password(password, &record.password_hash)? {
        return Err(AuthError::CredentialError.into());
    }

    debug!(user_id = record.user.id, "login succeeded");
    issue_token_pair(record.user, jwt_secret)
}

/// Exchange a verified refresh token for a new access token.
pub async fn refresh(
    pool: &PgPool,
    claims: &TokenClaims,
    jwt_secret: &[u8],
) -> AppResult<AccessTokenResponse> {
    let user_id = claims
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid token subject".into()))?;

    // The account may have been removed since the refresh token was issued.
    if roster_core::users::get_user_by_id(pool, user_id).await?.is_none() {
        return Err(AppError::Unauthorized("User not found".into()));
    }

    let access_token =
        roster_core::auth::jwt::generate_token(user_id, TokenKind::Access, jwt_secret)?;
    Ok(AccessTokenResponse {
        access_token,
        expires_in: ACCESS_TOKEN_EXPIRY_SECS,
        token_type: "Bearer".to_string(),
    })
}

/// Logout — revoke the presented token's `jti`.
pub async fn logout(pool: &PgPool, claims: &TokenClaims) -> AppResult<LogoutResponse> {
    let revoked = revocation::revoke_token(pool, &claims.jti).await?;
    info!(revoked_id = revoked.id, kind = ?claims.kind, sub = %claims.sub, "token revoked");
    Ok(LogoutResponse { success: true })
}

/// Full bearer-token check: signature, expiry, kind, then revocation.
///
/// The first three never touch the database.
pub async fn authenticate(
    pool: &PgPool,
    token: &str,
    expected: TokenKind,
    jwt_secret: &[u8],
) -> AppResult<TokenClaims> {
    let claims = verify_token(token, jwt_secret)
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

    if claims.kind != expected {
        return Err(AppError::Unauthorized(match expected {
            TokenKind::Access => "Access token required".into(),
            TokenKind::Refresh => "Refresh token required".into(),
        }));
    }

    if revocation::is_token_revoked(pool, &claims.jti).await? {
        return Err(AppError::Unauthorized("Token has been revoked".into()));
    }

    Ok(claims)
}
