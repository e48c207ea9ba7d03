use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global broadcast tick counter, shared by the ticker and status endpoints.
///
/// Starts at 0 and only ever grows.
#[derive(Debug, Clone, Default)]
pub struct TickCounter(Arc<AtomicU64>);

impl TickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new value
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }
}
