//! User directory request handlers.

use axum::{Extension, Json};
use axum::extract::State;
use tracing::debug;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{DataEnvelope, UserView};

/// `GET /api/users` — list every user. Requires an access token.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> AppResult<Json<DataEnvelope<Vec<UserView>>>> {
    let users = roster_core::users::list_users(&state.pool).await?;
    debug!(caller = %caller.0.sub, count = users.len(), "listed users");
    Ok(Json(DataEnvelope::new(
        users.into_iter().map(UserView::from).collect(),
    )))
}
