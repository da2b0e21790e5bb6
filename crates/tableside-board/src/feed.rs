/*
[INPUT]:  Order API capability, poll interval, on-demand refresh requests
[OUTPUT]: Latest board snapshot via `watch` plus the last fetch error
[POS]:    Data layer - polling feed that keeps the board mirror fresh
[UPDATE]: When changing refresh cadence, error reporting, or shutdown semantics
*/

use std::sync::Arc;
use std::time::Duration;

use tableside_adapter::OrderApi;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::board::BoardSnapshot;

/// Why the last fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedError {
    pub message: String,
    pub auth_error: bool,
}

/// What subscribers see: the newest snapshot and the newest error.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    pub snapshot: Option<BoardSnapshot>,
    pub last_error: Option<FeedError>,
}

/// Handle to a running feed worker.
#[derive(Debug)]
pub struct OrderFeed {
    state_rx: watch::Receiver<FeedState>,
    refresh_tx: mpsc::UnboundedSender<()>,
    shutdown: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl OrderFeed {
    /// Start polling. Fetches once immediately.
    pub fn spawn(api: Arc<dyn OrderApi>, poll_interval: Duration) -> Self {
        let (state_tx, state_rx) = watch::channel(FeedState::default());
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let worker = tokio::spawn(run_feed_worker(
            api,
            poll_interval,
            state_tx,
            refresh_rx,
            shutdown.clone(),
        ));

        Self {
            state_rx,
            refresh_tx,
            shutdown,
            worker: Some(worker),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state_rx.clone()
    }

    /// Ask for a fetch ahead of the next tick.
    pub fn refresh_now(&self) {
        let _ = self.refresh_tx.send(());
    }

    /// Stop the worker and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        if let Some(worker) = self.worker.take() {
            if let Err(err) = worker.await {
                warn!(error = %err, "order feed worker panicked");
            }
        }
        info!("order feed stopped");
    }
}

impl Drop for OrderFeed {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run_feed_worker(
    api: Arc<dyn OrderApi>,
    poll_interval: Duration,
    state_tx: watch::Sender<FeedState>,
    mut refresh_rx: mpsc::UnboundedReceiver<()>,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut generation: u64 = 0;
    let mut backoff: Option<Duration> = None;

    loop {
        match backoff.take() {
            Some(delay) => {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
                // Refreshes asked for during the backoff collapse into this fetch.
                while refresh_rx.try_recv().is_ok() {}
                ticker.reset();
            }
            None => {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {}
                    Some(()) = refresh_rx.recv() => {
                        // Coalesce queued refresh requests into one fetch.
                        while refresh_rx.try_recv().is_ok() {}
                        ticker.reset();
                    }
                }
            }
        }

        generation += 1;
        let result = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = api.fetch_orders() => result,
        };

        match result {
            Ok(orders) => {
                debug!(generation, count = orders.len(), "order snapshot fetched");
                state_tx.send_modify(|state| {
                    state.snapshot = Some(BoardSnapshot::new(generation, orders));
                    state.last_error = None;
                });
            }
            Err(err) => {
                warn!(generation, error = %err, "order snapshot fetch failed");
                if err.is_retryable() {
                    backoff = err.retry_delay().map(Duration::from_secs);
                    if let Some(delay) = backoff {
                        debug!(delay_secs = delay.as_secs(), "backing off before next fetch");
                    }
                }
                let feed_error = FeedError {
                    message: err.to_string(),
                    auth_error: err.is_auth_error(),
                };
                state_tx.send_modify(|state| state.last_error = Some(feed_error));
            }
        }
    }
}
