//! View state of the rapid-response aside: the current snapshot plus the chart
//! rendered from it.

use crate::chart_renderer::{ChartRenderer, RenderReport};
use crate::data_types::{ChartConfig, Snapshot, SnapshotPatch};
use crate::polling::ResponseSource;
use eyre::Result;
use std::time::Instant;
use tracing::{info, warn};

pub struct ResponseAside {
    state: Snapshot,
    chart: ChartRenderer,
}

impl ResponseAside {
    /// Builds the aside and draws the initial (usually empty) chart.
    pub fn new(initial: Snapshot, config: ChartConfig) -> Self {
        let mut chart = ChartRenderer::new(config);
        chart.render(&initial, Instant::now());
        Self {
            state: initial,
            chart,
        }
    }

    /// Merges `patch` over the current state and re-renders.
    pub fn apply(&mut self, patch: SnapshotPatch, now: Instant) -> RenderReport {
        self.state.apply(patch);
        self.chart.render(&self.state, now)
    }

    /// Applies the result of a toggle request. Returns whether polling should
    /// be (re)started. A failed request leaves the state untouched.
    pub fn apply_toggle(&mut self, result: Result<SnapshotPatch>, now: Instant) -> bool {
        match result {
            Ok(patch) => {
                self.apply(patch, now);
                info!(is_open = self.state.is_open, "toggled response status");
                self.state.is_open
            }
            Err(err) => {
                warn!("toggle request failed: {err:#}");
                false
            }
        }
    }

    pub async fn toggle<S: ResponseSource>(&mut self, source: &S) -> bool {
        let result = source.fetch_toggle().await;
        self.apply_toggle(result, Instant::now())
    }

    /// Staff start polling on load even while closed; the first poll ends the
    /// loop again if nothing is open.
    pub fn polls_on_load(&self) -> bool {
        self.state.is_staff
    }

    pub fn state(&self) -> &Snapshot {
        &self.state
    }

    pub fn chart(&self) -> &ChartRenderer {
        &self.chart
    }

    pub fn config(&self) -> &ChartConfig {
        self.chart.config()
    }
}
