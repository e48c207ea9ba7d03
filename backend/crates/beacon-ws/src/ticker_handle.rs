use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Owner of a running broadcast ticker.
///
/// `shutdown` stops the schedule and waits for the current tick. Dropping
/// the handle without calling it aborts the task.
pub struct TickerHandle {
    join: Option<JoinHandle<()>>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl TickerHandle {
    pub(crate) fn new(join: JoinHandle<()>, stop_tx: oneshot::Sender<()>) -> Self {
        Self {
            join: Some(join),
            stop_tx: Some(stop_tx),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(|join| join.is_finished())
    }

    pub async fn shutdown(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            // The task may already have stopped on the process-wide signal.
            let _ = stop_tx.send(());
        }

        if let Some(join) = self.join.take()
            && let Err(e) = join.await
        {
            log::error!("Broadcast ticker task failed: {}", e);
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}
