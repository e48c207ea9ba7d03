/// Outcome of a single broadcast tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Counter value after this tick's increment
    pub tick: u64,
    /// Connections in this tick's snapshot
    pub recipients: usize,
    pub send_failures: usize,
    /// Connections force-closed by the session limit
    pub closed: usize,
    pub close_failures: usize,
}

impl TickReport {
    pub fn sent(&self) -> usize {
        self.recipients - self.send_failures
    }
}
