//! Scales mapping histogram data to chart-local pixels and colors.

use crate::data_types::{ColorDomain, HistogramEntry};
use crate::theme::CATEGORY10;
use d3rs::scale::{LinearScale, Scale as D3Scale};
use gpui::{rgb, Hsla};
use std::collections::HashMap;

/// Tick count the magnitude axis aims for.
pub const TARGET_TICKS: u32 = 6;

/// Categorical positional scale with uniform padding around bands.
///
/// Mirrors a rounded d3 band scale: inner and outer padding are equal and the
/// leftover space is split evenly on both sides.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    start: f32,
    step: f32,
    bandwidth: f32,
}

impl BandScale {
    pub fn new(domain: Vec<String>, width: f32, padding: f32) -> Self {
        let n = domain.len() as f32;
        let step = (width / (n - padding + padding * 2.0).max(1.0)).floor();
        let start = ((width - step * (n - padding)) * 0.5).round();
        let bandwidth = (step * (1.0 - padding)).round();
        let index = domain
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();
        Self {
            domain,
            index,
            start,
            step,
            bandwidth,
        }
    }

    pub fn from_histogram(histogram: &[HistogramEntry], width: f32, padding: f32) -> Self {
        let domain = histogram.iter().map(|e| e.answer_id.clone()).collect();
        Self::new(domain, width, padding)
    }

    /// Left edge of the band for `id`, or `None` if the id is not in the domain.
    pub fn position(&self, id: &str) -> Option<f32> {
        self.index
            .get(id)
            .map(|&idx| self.start + self.step * idx as f32)
    }

    /// Horizontal centre of the band for `id`.
    pub fn center(&self, id: &str) -> Option<f32> {
        self.position(id).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Linear count-to-pixel scale with an inverted range, so larger counts sit
/// higher on screen.
#[derive(Clone)]
pub struct MagnitudeScale {
    max_count: Option<u32>,
    height: f32,
    target_ticks: u32,
    inner: LinearScale,
}

impl MagnitudeScale {
    pub fn new(max_count: Option<u32>, height: f32) -> Self {
        let upper = max_count.map(f64::from).unwrap_or(1.0);
        let inner = LinearScale::new()
            .domain(0.0, upper)
            .range(height as f64, 0.0);
        Self {
            max_count,
            height,
            target_ticks: TARGET_TICKS,
            inner,
        }
    }

    pub fn with_target_ticks(mut self, target_ticks: u32) -> Self {
        self.target_ticks = target_ticks;
        self
    }

    /// Upper domain bound; NaN when there is no data.
    pub fn domain_max(&self) -> f64 {
        self.max_count.map(f64::from).unwrap_or(f64::NAN)
    }

    /// Pixel y of the top of a bar of `count`. A degenerate domain (no data or
    /// a zero maximum) pins everything to the baseline.
    pub fn map(&self, count: f64) -> f32 {
        match self.max_count {
            Some(max) if max > 0 => {
                let y = self.inner.scale(count).round() as f32;
                if y.is_finite() {
                    y
                } else {
                    self.height
                }
            }
            _ => self.height,
        }
    }

    /// Bar height for `count`, measured up from the baseline.
    pub fn bar_height(&self, count: f64) -> f32 {
        self.height - self.map(count)
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn ticks(&self) -> Vec<u32> {
        integer_ticks_with(self.domain_max(), self.target_ticks)
    }
}

/// Ordinal category-to-color scale over the append-only color domain.
pub struct ColorScale<'a> {
    domain: &'a ColorDomain,
}

impl<'a> ColorScale<'a> {
    pub fn new(domain: &'a ColorDomain) -> Self {
        Self { domain }
    }

    pub fn palette_index(&self, id: &str) -> usize {
        self.domain.index_of(id).unwrap_or(0) % CATEGORY10.len()
    }

    pub fn color_of(&self, id: &str) -> Hsla {
        rgb(CATEGORY10[self.palette_index(id)]).into()
    }
}

/// Integer tick values for a magnitude axis ending at `max_count`.
pub fn integer_ticks(max_count: f64) -> Vec<u32> {
    integer_ticks_with(max_count, TARGET_TICKS)
}

/// Up to `target` evenly spaced, non-negative integer ticks starting at zero.
///
/// A non-finite or negative bound yields no ticks at all; a zero bound
/// collapses every tick onto a single `0`.
pub fn integer_ticks_with(max_count: f64, target: u32) -> Vec<u32> {
    if target == 0 || !max_count.is_finite() || max_count < 0.0 {
        return Vec::new();
    }
    let increment = (max_count / target as f64).ceil();
    if !increment.is_finite() || increment > u32::MAX as f64 {
        return Vec::new();
    }
    let increment = increment as u32;

    let mut ticks: Vec<u32> = Vec::with_capacity(target as usize);
    for i in 0..target {
        let tick = i.saturating_mul(increment);
        if !ticks.contains(&tick) {
            ticks.push(tick);
        }
    }
    ticks
}
