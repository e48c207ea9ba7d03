use metrics::{counter, gauge};

/// Metrics collector for WebSocket operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "beacon_ws" }
    }

    /// Record a connection entering the registry
    pub fn connection_opened(&self) {
        counter!(format!("{}.connections.opened", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record a connection leaving the registry
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    pub fn message_received(&self) {
        counter!(format!("{}.messages.received", self.prefix)).increment(1);
    }

    /// Record a message queued for a client ("reply" or "broadcast")
    pub fn message_sent(&self, message_type: &str) {
        counter!(format!("{}.messages.sent", self.prefix)).increment(1);
        counter!(format!("{}.messages.sent.{}", self.prefix, message_type)).increment(1);
    }

    /// Record one broadcast tick
    pub fn broadcast_tick(&self, tick: u64, recipients: usize) {
        counter!(format!("{}.broadcast.ticks", self.prefix)).increment(1);
        gauge!(format!("{}.broadcast.counter", self.prefix)).set(tick as f64);
        gauge!(format!("{}.broadcast.recipients", self.prefix)).set(recipients as f64);
    }

    /// Record a connection force-closed by the session limit
    pub fn connection_evicted(&self) {
        counter!(format!("{}.connections.evicted", self.prefix)).increment(1);
    }

    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
