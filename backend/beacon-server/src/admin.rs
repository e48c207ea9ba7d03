//! Administrative endpoints for server management.

use axum::{Json, extract::State, http::StatusCode};
use beacon_ws::AppState;
use log::info;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ShutdownResponse {
    pub status: String,
    pub message: String,
}

/// POST /admin/shutdown - trigger the same graceful shutdown as Ctrl+C.
pub async fn shutdown_handler(State(state): State<AppState>) -> (StatusCode, Json<ShutdownResponse>) {
    info!("Graceful shutdown requested via HTTP");
    state.shutdown.shutdown();

    (
        StatusCode::ACCEPTED,
        Json(ShutdownResponse {
            status: "ok".to_string(),
            message: "Shutdown initiated".to_string(),
        }),
    )
}
