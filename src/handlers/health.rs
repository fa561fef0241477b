use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use super::AppState;
use crate::api::Alerts;
use crate::middleware::ApiResponse;

/// GET /health - liveness plus a database round trip
pub async fn get(State(state): State<AppState>) -> impl IntoResponse {
    match state.backend.health_check().await {
        Ok(()) => ApiResponse::success(json!({ "status": "ok" })).into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                axum::Json(Alerts::error("Database temporarily unavailable")),
            )
                .into_response()
        }
    }
}
