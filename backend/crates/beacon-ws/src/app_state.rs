use crate::{
    ConnectionConfig, ConnectionInfo, ConnectionRegistry, ConnectionSlot, ConnectionSlots,
    SessionHandler, ShutdownCoordinator, TickCounter, WebSocketConnection,
    create_connection_span,
};

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};
use log::{debug, error, warn};
use tracing::Instrument;

/// Shared application state for WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: ConnectionRegistry,
    pub session_handler: Arc<dyn SessionHandler>,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
    pub slots: ConnectionSlots,
    pub ticks: TickCounter,
}

/// WebSocket upgrade handler for `/ws/{param}`
pub async fn handler(
    State(state): State<AppState>,
    Path(param): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    debug!("WebSocket upgrade request on /ws/{}", param);

    if state.shutdown.is_shutdown() {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let slot = match state.slots.try_acquire() {
        Ok(slot) => slot,
        Err(e) => {
            warn!("Rejecting upgrade on /ws/{}: {}", param, e);
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
    };

    // A failed upgrade drops the callback, and with it the slot
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, param, state, slot)))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(
    socket: WebSocket,
    path_param: String,
    state: AppState,
    _slot: ConnectionSlot,
) {
    let info = ConnectionInfo::new(path_param);
    let connection_id = info.connection_id;
    let span = create_connection_span(&connection_id.to_string(), &info.path_param);
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(
        info,
        state.config.clone(),
        Arc::clone(&state.session_handler),
    );

    if let Err(e) = connection
        .handle(socket, shutdown_guard)
        .instrument(span)
        .await
    {
        error!("Connection {connection_id} error: {e}");
    }
}
