//! Background refresh loop.
//!
//! One cycle runs immediately, then one per interval tick. Cycles never
//! overlap: the loop awaits each cycle before waiting on the next tick and
//! ticks missed meanwhile are skipped. Every outcome carries a sequence
//! number so the receiving side can still drop anything out of order.

use std::{fmt, sync::Arc, time::Duration};

use tokio::{
    sync::mpsc,
    time::{MissedTickBehavior, interval},
};
use tokio_util::sync::CancellationToken;

use crate::{City, CycleOutcome, WeatherProvider, cycle::run_cycle};

/// Handle to a running refresh loop. Dropping it stops the loop.
pub struct Poller {
    outcome_rx: mpsc::Receiver<CycleOutcome>,
    cancel_token: CancellationToken,
}

impl fmt::Debug for Poller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("cancel_token", &self.cancel_token)
            .finish_non_exhaustive()
    }
}

impl Poller {
    /// Start polling `cities` every `every`. Must be called inside a tokio runtime.
    pub fn spawn(provider: Arc<dyn WeatherProvider>, cities: Vec<City>, every: Duration) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(4);
        let cancel_token = CancellationToken::new();

        let task_cancel = cancel_token.clone();
        tokio::spawn(async move {
            poll_loop(provider, cities, every, outcome_tx, task_cancel).await;
        });

        Self { outcome_rx, cancel_token }
    }

    /// Next cycle outcome, or `None` once the loop has stopped.
    pub async fn recv(&mut self) -> Option<CycleOutcome> {
        self.outcome_rx.recv().await
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

async fn poll_loop(
    provider: Arc<dyn WeatherProvider>,
    cities: Vec<City>,
    every: Duration,
    outcome_tx: mpsc::Sender<CycleOutcome>,
    cancel_token: CancellationToken,
) {
    let mut ticker = interval(every.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut seq: u64 = 0;

    loop {
        // The first tick completes immediately.
        tokio::select! {
            _ = ticker.tick() => {}
            () = cancel_token.cancelled() => {
                tracing::info!("weather polling stopped");
                return;
            }
        }

        seq += 1;
        tracing::info!(seq, cities = cities.len(), "fetching weather data");

        let result = tokio::select! {
            result = run_cycle(Arc::clone(&provider), &cities) => result,
            () = cancel_token.cancelled() => {
                tracing::info!(seq, "weather polling stopped mid-cycle, discarding results");
                return;
            }
        };

        tokio::select! {
            sent = outcome_tx.send(CycleOutcome { seq, result }) => {
                if sent.is_err() {
                    tracing::debug!(seq, "dashboard gone, discarding cycle result");
                    return;
                }
            }
            () = cancel_token.cancelled() => {
                tracing::info!(seq, "weather polling stopped, discarding results");
                return;
            }
        }
    }
}
