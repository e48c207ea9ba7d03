use beacon_ws::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - status with connection and tick counts
pub async fn health(State(state): State<AppState>) -> Response {
    let status = if state.shutdown.is_shutdown() {
        "shutting_down"
    } else {
        "healthy"
    };

    let health = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "connections": state.registry.len().await,
        "sessions": state.slots.in_use(),
        "max_connections": state.slots.max_total(),
        "ticks": state.ticks.get(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness check (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness check; false once shutdown has started
pub async fn readiness(State(state): State<AppState>) -> Response {
    if state.shutdown.is_shutdown() {
        (StatusCode::SERVICE_UNAVAILABLE, "Shutting down").into_response()
    } else {
        (StatusCode::OK, "Ready").into_response()
    }
}
