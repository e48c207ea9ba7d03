use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// Per-task view of the shutdown signal
pub struct ShutdownGuard {
    shutdown_rx: broadcast::Receiver<()>,
    triggered: Arc<AtomicBool>,
    coordinator_gone: bool,
}

impl ShutdownGuard {
    pub(crate) fn new(shutdown_rx: broadcast::Receiver<()>, triggered: Arc<AtomicBool>) -> Self {
        Self {
            shutdown_rx,
            triggered,
            coordinator_gone: false,
        }
    }

    /// Wait for shutdown. Returns at once if it was already triggered,
    /// even before this guard was created.
    ///
    /// A coordinator dropped without signalling is not a shutdown: the
    /// guard then waits forever.
    pub async fn wait(&mut self) {
        loop {
            if self.triggered.load(Ordering::Acquire) {
                return;
            }
            match self.shutdown_rx.recv().await {
                Ok(()) => return,
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => {
                    if self.triggered.load(Ordering::Acquire) {
                        return;
                    }
                    if !self.coordinator_gone {
                        log::warn!("Shutdown coordinator dropped without signalling");
                        self.coordinator_gone = true;
                    }
                    std::future::pending::<()>().await;
                }
            }
        }
    }

    /// Non-blocking check
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }
}
