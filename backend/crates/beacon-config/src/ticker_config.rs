use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Tick interval constraints (milliseconds)
pub const MIN_INTERVAL_MS: u64 = 10;
pub const MAX_INTERVAL_MS: u64 = 3_600_000;
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

pub const MIN_SESSION_LIMIT_TICKS: u64 = 1;
pub const DEFAULT_SESSION_LIMIT_TICKS: u64 = 100;

pub const DEFAULT_MESSAGE_PREFIX: &str = "Message from server, current time: ";

/// Broadcast ticker settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Period between ticks; the first tick fires after one period
    pub interval_ms: u64,
    /// Once the global tick counter exceeds this, every connection is closed
    pub session_limit_ticks: u64,
    /// Text placed before the timestamp in each broadcast
    pub message_prefix: String,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            session_limit_ticks: DEFAULT_SESSION_LIMIT_TICKS,
            message_prefix: String::from(DEFAULT_MESSAGE_PREFIX),
        }
    }
}

impl TickerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.interval_ms < MIN_INTERVAL_MS || self.interval_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::invalid(
                "ticker.interval_ms",
                format!(
                    "must be {}-{}, got {}",
                    MIN_INTERVAL_MS, MAX_INTERVAL_MS, self.interval_ms
                ),
            ));
        }

        if self.session_limit_ticks < MIN_SESSION_LIMIT_TICKS {
            return Err(ConfigError::invalid(
                "ticker.session_limit_ticks",
                format!(
                    "must be >= {}, got {}",
                    MIN_SESSION_LIMIT_TICKS, self.session_limit_ticks
                ),
            ));
        }

        Ok(())
    }
}
