use std::time::Duration;

/// Configuration for the periodic broadcast
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Tick period; the first tick fires one period after start
    pub interval: Duration,
    /// Every connection is closed on each tick once the counter exceeds this
    pub session_limit_ticks: u64,
    /// Prepended to the timestamp in each broadcast message
    pub message_prefix: String,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            session_limit_ticks: 100,
            message_prefix: String::from("Message from server, current time: "),
        }
    }
}
