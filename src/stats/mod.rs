//! Delivery counting and periodic reporting.
//!
//! The counter is shared between the pull session's message callback and a
//! background reporter task. Atomics keep concurrent increments from losing
//! updates; the reporter logs and resets the current window on a fixed
//! period, firing immediately on start, and drains the final partial window
//! when the shutdown signal fires.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::info;

/// Counter of delivered messages, safe to share across delivery callbacks.
#[derive(Debug, Default)]
pub struct DeliveryCounter {
    window: AtomicU64,
    total: AtomicU64,
}

impl DeliveryCounter {
    /// Create a counter with both the window and the total at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one delivered message.
    pub fn record(&self) {
        self.window.fetch_add(1, Ordering::Relaxed);
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    /// Read and reset the current reporting window.
    pub fn take_window(&self) -> u64 {
        self.window.swap(0, Ordering::Relaxed)
    }

    /// Cumulative count since the counter was created. Unaffected by
    /// window resets.
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

/// Spawn the periodic report task.
///
/// The first report fires immediately, then once per `period`. Each report
/// logs the window count and resets it. When `shutdown` fires the task
/// drains the final partial window, reports it, and exits.
pub fn spawn_reporter(
    counter: Arc<DeliveryCounter>,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    info!("Received {} messages", counter.take_window());
                }
                _ = shutdown.recv() => {
                    info!("Received {} messages", counter.take_window());
                    info!("Received {} messages in total", counter.total());
                    break;
                }
            }
        }
    })
}
