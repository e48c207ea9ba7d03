use crate::{Result as WsErrorResult, WsError};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Upper bound on concurrent sessions, reserved before the upgrade.
///
/// A slot is taken atomically when the upgrade request is accepted and held
/// until the session task ends, so concurrent upgrades cannot overshoot
/// `max_total`.
#[derive(Debug, Clone)]
pub struct ConnectionSlots {
    max_total: usize,
    active: Arc<AtomicUsize>,
}

impl ConnectionSlots {
    pub fn new(max_total: usize) -> Self {
        Self {
            max_total,
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[track_caller]
    pub fn try_acquire(&self) -> WsErrorResult<ConnectionSlot> {
        let max = self.max_total;
        match self
            .active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current < max).then_some(current + 1)
            }) {
            Ok(_) => Ok(ConnectionSlot {
                active: Arc::clone(&self.active),
            }),
            Err(current) => Err(WsError::connection_limit_exceeded(current, max)),
        }
    }

    /// Sessions currently holding a slot
    pub fn in_use(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    pub fn max_total(&self) -> usize {
        self.max_total
    }
}

/// One reserved session; releases its slot on drop
#[derive(Debug)]
pub struct ConnectionSlot {
    active: Arc<AtomicUsize>,
}

impl Drop for ConnectionSlot {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}
