use crate::{
    BroadcastConfig, ConnectionRegistry, Metrics, ShutdownGuard, TickCounter, TickReport,
    TickerHandle,
};

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use tokio::sync::oneshot;
use tokio::time::{Instant, interval_at};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %z";

/// Periodic broadcast of a timestamped message to every registered connection.
///
/// Each tick advances a global counter. Once the counter exceeds
/// `session_limit_ticks`, every connection in that tick's snapshot is closed,
/// however recently it was opened.
pub struct BroadcastTicker {
    registry: ConnectionRegistry,
    config: BroadcastConfig,
    metrics: Metrics,
    counter: TickCounter,
}

impl BroadcastTicker {
    pub fn new(registry: ConnectionRegistry, config: BroadcastConfig, metrics: Metrics) -> Self {
        Self {
            registry,
            config,
            metrics,
            counter: TickCounter::new(),
        }
    }

    /// Shared handle to the tick counter
    pub fn counter(&self) -> TickCounter {
        self.counter.clone()
    }

    pub fn compose_message(&self, now: DateTime<Local>) -> String {
        format!(
            "{}{}",
            self.config.message_prefix,
            now.format(TIMESTAMP_FORMAT)
        )
    }

    /// Run one tick. Failures on individual connections are logged and
    /// counted in the report; they never stop the tick.
    pub async fn tick(&self) -> TickReport {
        let message = self.compose_message(Local::now());
        let tick = self.counter.advance();
        let evict = tick > self.config.session_limit_ticks;

        let snapshot = self.registry.snapshot().await;
        let mut report = TickReport {
            tick,
            recipients: snapshot.len(),
            ..TickReport::default()
        };
        self.metrics.broadcast_tick(tick, snapshot.len());

        if snapshot.is_empty() {
            return report;
        }

        for connection in &snapshot {
            match connection.send_text_nowait(&message) {
                Ok(()) => self.metrics.message_sent("broadcast"),
                Err(e) => {
                    warn!("Broadcast to connection {} failed: {}", connection.id(), e);
                    self.metrics.error_occurred(e.kind());
                    report.send_failures += 1;
                }
            }

            if evict {
                if let Err(e) = connection.close() {
                    warn!("Closing connection {} failed: {}", connection.id(), e);
                    self.metrics.error_occurred(e.kind());
                    report.close_failures += 1;
                }
                // A server-side close does not guarantee a close callback.
                if self.registry.remove(connection.id()).await {
                    self.metrics.connection_closed("session_limit");
                }
                self.metrics.connection_evicted();
                report.closed += 1;
            }
        }

        if evict {
            info!(
                "Tick {}: session limit of {} ticks exceeded, closed {} connection(s)",
                tick, self.config.session_limit_ticks, report.closed
            );
        }

        report
    }

    /// Start the schedule on its own task.
    ///
    /// The task stops when `shutdown` fires or the returned handle is shut
    /// down; a tick in progress always runs to completion.
    pub fn spawn(self, shutdown: ShutdownGuard) -> TickerHandle {
        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(self.run(shutdown, stop_rx));
        TickerHandle::new(join, stop_tx)
    }

    async fn run(self, mut shutdown: ShutdownGuard, mut stop_rx: oneshot::Receiver<()>) {
        let period = self.config.interval;
        let mut interval = interval_at(Instant::now() + period, period);

        info!(
            "Broadcast ticker started (every {:?}, session limit {} ticks)",
            period, self.config.session_limit_ticks
        );

        loop {
            tokio::select! {
                _ = shutdown.wait() => {
                    info!("Broadcast ticker stopping: shutdown");
                    break;
                }
                _ = &mut stop_rx => {
                    info!("Broadcast ticker stopping: handle shut down");
                    break;
                }
                _ = interval.tick() => {
                    let report = self.tick().await;
                    debug!(
                        "Tick {}: sent to {}/{} connection(s), closed {}",
                        report.tick,
                        report.sent(),
                        report.recipients,
                        report.closed
                    );
                }
            }
        }

        info!("Broadcast ticker stopped after {} tick(s)", self.counter.get());
    }
}
