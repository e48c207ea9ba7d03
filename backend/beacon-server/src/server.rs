use crate::build_router;
use crate::error::Result as ServerErrorResult;

use beacon_config::Config;
use beacon_ws::{
    AppState, BroadcastConfig, BroadcastTicker, ConnectionConfig, ConnectionRegistry,
    ConnectionSlots, EchoSessionHandler, Metrics, ShutdownCoordinator,
};

use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

/// Wire the registry, session handler and ticker from configuration.
///
/// The ticker is returned unstarted; its counter is already shared with the
/// returned state.
pub fn build_components(
    config: &Config,
    shutdown: ShutdownCoordinator,
) -> (AppState, BroadcastTicker) {
    let registry = ConnectionRegistry::new();
    let metrics = Metrics::new();

    let connection_config = ConnectionConfig {
        send_buffer_size: config.websocket.send_buffer_size,
        reply_text: config.websocket.reply_text.clone(),
        remove_on_error: config.websocket.remove_on_error,
    };

    let broadcast_config = BroadcastConfig {
        interval: config.ticker.interval(),
        session_limit_ticks: config.ticker.session_limit_ticks,
        message_prefix: config.ticker.message_prefix.clone(),
    };

    let session_handler = Arc::new(EchoSessionHandler::new(
        registry.clone(),
        connection_config.clone(),
        metrics.clone(),
    ));
    let ticker = BroadcastTicker::new(registry.clone(), broadcast_config, metrics);

    let state = AppState {
        registry,
        session_handler,
        shutdown,
        config: connection_config,
        slots: ConnectionSlots::new(config.server.max_connections),
        ticks: ticker.counter(),
    };

    (state, ticker)
}

/// Serve on `listener` until `shutdown` fires, then stop the ticker.
pub async fn serve(
    listener: TcpListener,
    config: &Config,
    shutdown: ShutdownCoordinator,
) -> ServerErrorResult<()> {
    let (app_state, ticker) = build_components(config, shutdown.clone());
    let ticker = ticker.spawn(shutdown.subscribe_guard());
    let app = build_router(app_state);

    info!("Server listening on {}", listener.local_addr()?);

    let mut guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            guard.wait().await;
        })
        .await?;

    ticker.shutdown().await;
    info!("Graceful shutdown complete");

    Ok(())
}
