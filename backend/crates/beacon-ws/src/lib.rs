pub mod app_state;
pub mod broadcast_config;
pub mod broadcast_ticker;
pub mod channel_connection;
pub mod connection;
pub mod connection_config;
pub mod connection_id;
pub mod connection_info;
pub mod connection_slots;
pub mod connection_registry;
pub mod echo_session_handler;
pub mod error;
pub mod metrics;
pub mod session_handler;
pub mod session_state;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod tick_counter;
pub mod tick_report;
pub mod ticker_handle;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use broadcast_config::BroadcastConfig;
pub use broadcast_ticker::BroadcastTicker;
pub use channel_connection::ChannelConnection;
pub use connection::Connection;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_slots::{ConnectionSlot, ConnectionSlots};
pub use connection_registry::ConnectionRegistry;
pub use echo_session_handler::EchoSessionHandler;
pub use error::{Result, WsError};
pub use metrics::Metrics;
pub use session_handler::SessionHandler;
pub use session_state::SessionState;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use tick_counter::TickCounter;
pub use tick_report::TickReport;
pub use ticker_handle::TickerHandle;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for one WebSocket session.
/// All log entries within the connection task carry these fields.
pub fn create_connection_span(connection_id: &str, path_param: &str) -> tracing::Span {
    info_span!(
        "ws_connection",
        connection_id = %connection_id,
        path_param = %path_param,
    )
}
