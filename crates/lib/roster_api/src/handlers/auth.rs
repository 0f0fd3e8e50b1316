//! Authentication request handlers.

use axum::extract::State;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    AccessTokenResponse, DataEnvelope, LoginRequest, LogoutResponse, RegisterRequest,
    TokenResponse,
};
use crate::services::auth;

/// `POST /api/auth/register` — create a new user account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Json<DataEnvelope<TokenResponse>>> {
    let resp = auth::register(
        &state.pool,
        &body.username,
        body.email.as_deref(),
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(DataEnvelope::new(resp)))
}

/// `POST /api/auth/login` — authenticate with username + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<DataEnvelope<TokenResponse>>> {
    let resp = auth::login(
        &state.pool,
        &body.username,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(DataEnvelope::new(resp)))
}

/// `POST /api/auth/refresh` — exchange a refresh token for a new access token.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<DataEnvelope<AccessTokenResponse>>> {
    let resp = auth::refresh(&state.pool, &user.0, state.config.jwt_secret.as_bytes()).await?;
    Ok(Json(DataEnvelope::new(resp)))
}

/// `POST /api/auth/logout` — revoke the presented access token.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<DataEnvelope<LogoutResponse>>> {
    let resp = auth::logout(&state.pool, &user.0).await?;
    Ok(Json(DataEnvelope::new(resp)))
}

/// `POST /api/auth/logout/refresh` — revoke the presented refresh token.
pub async fn logout_refresh_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<DataEnvelope<LogoutResponse>>> {
    let resp = auth::logout(&state.pool, &user.0).await?;
    Ok(Json(DataEnvelope::new(resp)))
}
