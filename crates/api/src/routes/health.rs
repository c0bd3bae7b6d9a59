//! Health check route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// GET /health
///
/// Liveness plus a database round-trip. Returns 503 when the pool cannot
/// reach the database.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match loretable_db::health_check(&state.pool).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

/// Routes mounted at the server root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
