use eyre::{bail, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 100.0,
            right: 80.0,
            bottom: 200.0,
            left: 80.0,
        }
    }
}

/// Layout, animation and polling settings for the response chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Width of the plotting area, margins excluded.
    pub width: f32,
    /// Height of the plotting area, margins excluded.
    pub height: f32,
    pub margins: Margins,
    /// Fraction of each band step left empty between bars.
    pub band_padding: f32,
    pub target_ticks: u32,
    /// Line height of wrapped axis labels, in ems.
    pub label_line_height: f32,
    pub label_font_size: f32,
    pub transition_ms: u64,
    pub poll_interval_ms: u64,
    pub no_data_message: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 500.0,
            margins: Margins::default(),
            band_padding: 0.1,
            target_ticks: 6,
            label_line_height: 1.1,
            label_font_size: 10.0,
            transition_ms: 250,
            poll_interval_ms: 3000,
            no_data_message: "No data available".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).wrap_err("invalid chart configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            bail!(
                "chart dimensions must be positive, got {}x{}",
                self.width,
                self.height
            );
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            bail!("band padding must be in [0, 1), got {}", self.band_padding);
        }
        if self.target_ticks == 0 {
            bail!("target tick count must be at least 1");
        }
        if self.poll_interval_ms == 0 {
            bail!("poll interval must be non-zero");
        }
        Ok(())
    }

    /// Total size including margins.
    pub fn outer_size(&self) -> (f32, f32) {
        (
            self.width + self.margins.left + self.margins.right,
            self.height + self.margins.top + self.margins.bottom,
        )
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Anchor of the empty-state message, relative to the plotting area.
    pub fn message_anchor(&self) -> (f32, f32) {
        (self.width / 2.0 - 150.0, self.height - 100.0)
    }
}
