//! Health endpoint.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::models::{DataEnvelope, HealthResponse};

/// `GET /api/health` — reports the version and PostgreSQL connectivity.
pub async fn health_handler(State(state): State<AppState>) -> Json<DataEnvelope<HealthResponse>> {
    let db_connected = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => true,
        Err(e) => {
            warn!("database health check failed: {e}");
            false
        }
    };

    Json(DataEnvelope::new(HealthResponse {
        version: roster_core::version().to_string(),
        db_connected,
    }))
}
