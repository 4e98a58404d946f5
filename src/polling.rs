//! Self-terminating poll loop feeding snapshots to the chart.

use crate::data_types::SnapshotPatch;
use eyre::Result;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Host endpoints the aside talks to.
#[allow(async_fn_in_trait)]
pub trait ResponseSource {
    /// Current responses and open/staff flags.
    async fn fetch_snapshot(&self) -> Result<SnapshotPatch>;

    /// Flips the open status and returns the resulting state.
    async fn fetch_toggle(&self) -> Result<SnapshotPatch>;
}

/// Why a poll loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// The state no longer allows polling.
    Closed,
    /// `PollHandle::stop` was called.
    Stopped,
    /// A fetch failed; the loop does not retry.
    Failed,
}

/// Cancels a running poll loop at its next suspension point.
#[derive(Clone, Debug, Default)]
pub struct PollHandle {
    stopped: Rc<Cell<bool>>,
}

impl PollHandle {
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Whether both handles control the same loop.
    pub fn same_loop(&self, other: &PollHandle) -> bool {
        Rc::ptr_eq(&self.stopped, &other.stopped)
    }
}

pub struct PollingCoordinator {
    interval: Duration,
    handle: PollHandle,
}

impl PollingCoordinator {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            handle: PollHandle::default(),
        }
    }

    pub fn handle(&self) -> PollHandle {
        self.handle.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch, apply, sleep, repeat.
    ///
    /// `apply` merges the patch into the view state, renders, and returns
    /// whether polling may continue. `sleep` produces the delay between polls.
    pub async fn run<S, A, Sl, Fut>(&self, source: &S, mut apply: A, mut sleep: Sl) -> PollOutcome
    where
        S: ResponseSource,
        A: FnMut(SnapshotPatch) -> bool,
        Sl: FnMut(Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        info!(interval_ms = self.interval.as_millis() as u64, "polling for responses");
        let mut polls: u64 = 0;

        loop {
            if self.handle.is_stopped() {
                info!(polls, "polling stopped");
                return PollOutcome::Stopped;
            }

            let patch = match source.fetch_snapshot().await {
                Ok(patch) => patch,
                Err(err) => {
                    error!(polls, "error retrieving response data: {err:#}");
                    return PollOutcome::Failed;
                }
            };
            polls += 1;

            if self.handle.is_stopped() {
                info!(polls, "polling stopped");
                return PollOutcome::Stopped;
            }

            if !apply(patch) {
                info!(polls, "responses closed, polling finished");
                return PollOutcome::Closed;
            }

            debug!(polls, "next poll scheduled");
            sleep(self.interval).await;
        }
    }
}
