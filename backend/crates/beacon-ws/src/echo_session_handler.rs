use crate::{Connection, ConnectionConfig, ConnectionRegistry, Metrics, SessionHandler, WsError};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, info, warn};

/// Registers connections and answers every text message with a fixed reply
pub struct EchoSessionHandler {
    registry: ConnectionRegistry,
    config: ConnectionConfig,
    metrics: Metrics,
}

impl EchoSessionHandler {
    pub fn new(registry: ConnectionRegistry, config: ConnectionConfig, metrics: Metrics) -> Self {
        Self {
            registry,
            config,
            metrics,
        }
    }

    async fn unregister(&self, connection: &dyn Connection, reason: &str) {
        if self.registry.remove(connection.id()).await {
            self.metrics.connection_closed(reason);
        }
    }
}

#[async_trait]
impl SessionHandler for EchoSessionHandler {
    async fn on_open(&self, connection: Arc<dyn Connection>, path_param: &str) {
        info!(
            "Connection {} opened on /ws/{}",
            connection.id(),
            path_param
        );
        self.registry.add(connection).await;
        self.metrics.connection_opened();
    }

    async fn on_message(&self, text: &str, connection: &dyn Connection, path_param: &str) {
        debug!(
            "Received message on connection {} (/ws/{}): {}",
            connection.id(),
            path_param,
            text
        );
        self.metrics.message_received();

        match connection.send_text(&self.config.reply_text).await {
            Ok(()) => self.metrics.message_sent("reply"),
            Err(e) => {
                warn!("Reply to connection {} failed: {}", connection.id(), e);
                self.metrics.error_occurred(e.kind());
            }
        }
    }

    async fn on_close(&self, connection: &dyn Connection) {
        let info = connection.info();
        info!(
            "Connection {} on /ws/{} closed after {}s",
            info.connection_id,
            info.path_param,
            (Utc::now() - info.connected_at).num_seconds()
        );
        self.unregister(connection, "normal").await;
    }

    async fn on_error(&self, connection: &dyn Connection, cause: &WsError) {
        error!("Error on connection {}: {}", connection.id(), cause);
        self.metrics.error_occurred(cause.kind());

        if self.config.remove_on_error {
            self.unregister(connection, "error").await;
        }
    }
}
