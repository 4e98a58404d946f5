//! Keyed reconciliation of the bar set against the latest histogram.

use crate::data_types::{build_histogram, max_count, ChartConfig, ColorDomain, Snapshot};
use crate::label_wrap::{layout_label, TextMeasure, WrappedLabel};
use crate::scales::{BandScale, ColorScale, MagnitudeScale};
use crate::transition::Transition;
use gpui::Hsla;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::debug;

/// Visual element for one category.
#[derive(Clone, Debug)]
pub struct BarElement {
    pub answer_id: String,
    pub count: u32,
    pub x: f32,
    pub width: f32,
    pub fill: Hsla,
    pub palette_index: usize,
    y: Transition,
    height: Transition,
}

impl BarElement {
    pub fn y_at(&self, now: Instant) -> f32 {
        self.y.value_at(now)
    }

    pub fn height_at(&self, now: Instant) -> f32 {
        self.height.value_at(now)
    }

    pub fn target_y(&self) -> f32 {
        self.y.target()
    }

    pub fn target_height(&self) -> f32 {
        self.height.target()
    }

    fn is_animating(&self, now: Instant) -> bool {
        self.y.is_running(now) || self.height.is_running(now)
    }
}

/// A value label on the magnitude axis.
#[derive(Clone, Debug)]
pub struct AxisTick {
    pub value: u32,
    y: Transition,
}

impl AxisTick {
    pub fn y_at(&self, now: Instant) -> f32 {
        self.y.value_at(now)
    }

    pub fn target_y(&self) -> f32 {
        self.y.target()
    }
}

/// Category label under the x axis, before wrapping.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryLabel {
    pub answer_id: String,
    pub answer_text: String,
    pub center_x: f32,
    pub max_width: f32,
}

/// Ids touched by each reconciliation phase of one render.
///
/// Entered bars also go through the update step; `updated` only lists the
/// bars that already existed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub entered: Vec<String>,
    pub updated: Vec<String>,
    pub exited: Vec<String>,
}

pub struct ChartRenderer {
    config: ChartConfig,
    color_domain: ColorDomain,
    bars: HashMap<String, BarElement>,
    order: Vec<String>,
    labels: Vec<CategoryLabel>,
    ticks: Vec<AxisTick>,
    y_scale: Option<MagnitudeScale>,
    message_visible: bool,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            color_domain: ColorDomain::new(),
            bars: HashMap::new(),
            order: Vec::new(),
            labels: Vec::new(),
            ticks: Vec::new(),
            y_scale: None,
            message_visible: false,
        }
    }

    /// Brings bars, axes and the empty-state message in line with `snapshot`.
    pub fn render(&mut self, snapshot: &Snapshot, now: Instant) -> RenderReport {
        let histogram = build_histogram(&snapshot.responses);
        self.message_visible = histogram.is_empty();

        let added = self
            .color_domain
            .ensure(histogram.iter().map(|e| e.answer_id.as_str()));

        let x = BandScale::from_histogram(&histogram, self.config.width, self.config.band_padding);
        let y = MagnitudeScale::new(max_count(&histogram), self.config.height)
            .with_target_ticks(self.config.target_ticks);
        let duration = self.config.transition_duration();

        let mut report = RenderReport::default();

        // Exit
        let live: HashSet<&str> = histogram.iter().map(|e| e.answer_id.as_str()).collect();
        let mut exited: Vec<String> = self
            .bars
            .keys()
            .filter(|id| !live.contains(id.as_str()))
            .cloned()
            .collect();
        exited.sort();
        for id in &exited {
            self.bars.remove(id);
        }
        report.exited = exited;

        // Enter + update
        let colors = ColorScale::new(&self.color_domain);
        for entry in &histogram {
            let count = f64::from(entry.count);
            let target_y = y.map(count);
            let target_height = y.bar_height(count);

            let bar = match self.bars.entry(entry.answer_id.clone()) {
                Entry::Occupied(slot) => {
                    report.updated.push(entry.answer_id.clone());
                    slot.into_mut()
                }
                Entry::Vacant(slot) => {
                    report.entered.push(entry.answer_id.clone());
                    // Enter at the final geometry so new bars don't grow from zero.
                    slot.insert(BarElement {
                        answer_id: entry.answer_id.clone(),
                        count: entry.count,
                        x: 0.0,
                        width: 0.0,
                        fill: colors.color_of(&entry.answer_id),
                        palette_index: colors.palette_index(&entry.answer_id),
                        y: Transition::settled(target_y, now),
                        height: Transition::settled(target_height, now),
                    })
                }
            };

            bar.count = entry.count;
            bar.x = x.position(&entry.answer_id).unwrap_or(0.0);
            bar.width = x.bandwidth();
            bar.fill = colors.color_of(&entry.answer_id);
            bar.palette_index = colors.palette_index(&entry.answer_id);
            bar.y.retarget(target_y, now, duration);
            bar.height.retarget(target_height, now, duration);
        }

        self.order = histogram.iter().map(|e| e.answer_id.clone()).collect();

        self.labels = histogram
            .iter()
            .map(|entry| CategoryLabel {
                answer_id: entry.answer_id.clone(),
                answer_text: entry.answer_text.clone(),
                center_x: x.center(&entry.answer_id).unwrap_or(0.0),
                max_width: x.bandwidth(),
            })
            .collect();

        self.update_ticks(&y, now);
        self.y_scale = Some(y);

        debug!(
            categories = histogram.len(),
            entered = report.entered.len(),
            updated = report.updated.len(),
            exited = report.exited.len(),
            new_colors = added,
            "rendered response histogram"
        );

        report
    }

    fn update_ticks(&mut self, y: &MagnitudeScale, now: Instant) {
        let duration = self.config.transition_duration();
        let previous = self
            .y_scale
            .as_ref()
            .filter(|scale| scale.domain_max().is_finite());

        let mut old: HashMap<u32, AxisTick> =
            self.ticks.drain(..).map(|tick| (tick.value, tick)).collect();

        self.ticks = y
            .ticks()
            .into_iter()
            .map(|value| {
                let target = y.map(f64::from(value));
                let mut tick = old.remove(&value).unwrap_or_else(|| {
                    let start = previous
                        .map(|scale| scale.map(f64::from(value)))
                        .unwrap_or(target);
                    AxisTick {
                        value,
                        y: Transition::settled(start, now),
                    }
                });
                tick.y.retarget(target, now, duration);
                tick
            })
            .collect();
    }

    /// Bars in histogram order.
    pub fn bars(&self) -> impl Iterator<Item = &BarElement> + '_ {
        self.order.iter().filter_map(move |id| self.bars.get(id))
    }

    pub fn bar(&self, answer_id: &str) -> Option<&BarElement> {
        self.bars.get(answer_id)
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    pub fn ticks(&self) -> &[AxisTick] {
        &self.ticks
    }

    pub fn labels(&self) -> &[CategoryLabel] {
        &self.labels
    }

    /// X-axis labels wrapped to their band width.
    pub fn wrapped_labels(&self, measure: &dyn TextMeasure) -> Vec<WrappedLabel> {
        wrap_labels(&self.labels, self.config.label_line_height, measure)
    }

    pub fn color_domain(&self) -> &ColorDomain {
        &self.color_domain
    }

    pub fn message(&self) -> Option<&str> {
        self.message_visible
            .then_some(self.config.no_data_message.as_str())
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.bars.values().any(|bar| bar.is_animating(now))
            || self.ticks.iter().any(|tick| tick.y.is_running(now))
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
}

pub fn wrap_labels(
    labels: &[CategoryLabel],
    line_height: f32,
    measure: &dyn TextMeasure,
) -> Vec<WrappedLabel> {
    labels
        .iter()
        .map(|label| {
            layout_label(
                &label.answer_id,
                &label.answer_text,
                label.center_x,
                label.max_width,
                line_height,
                measure,
            )
        })
        .collect()
}
