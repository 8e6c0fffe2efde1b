//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

fn reachability(ok: bool) -> String {
    if ok { "connected" } else { "unavailable" }.to_string()
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = state.db.health_check().await.unwrap_or(false);
    let storage = state.blobs.health_check().await.unwrap_or(false);

    Json(ApiResponse::ok(HealthResponse {
        status: if database && storage { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: reachability(database),
        storage: reachability(storage),
    }))
}
