use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Send buffer size constraints
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 100;

pub const DEFAULT_REPLY_TEXT: &str = "Hello.";
pub const DEFAULT_REMOVE_ON_ERROR: bool = true;

/// WebSocket session settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Per-connection outbound buffer (messages)
    pub send_buffer_size: usize,
    /// Fixed reply to every inbound text message
    pub reply_text: String,
    /// Drop a connection from the registry when the transport reports an error
    pub remove_on_error: bool,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            reply_text: String::from(DEFAULT_REPLY_TEXT),
            remove_on_error: DEFAULT_REMOVE_ON_ERROR,
        }
    }
}

impl WebSocketConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::invalid(
                "websocket.send_buffer_size",
                format!(
                    "must be {}-{}, got {}",
                    MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
                ),
            ));
        }

        if self.reply_text.is_empty() {
            return Err(ConfigError::invalid(
                "websocket.reply_text",
                "must not be empty",
            ));
        }

        Ok(())
    }
}
