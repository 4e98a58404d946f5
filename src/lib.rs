//! rapid_chart: live response histogram for the rapid-response aside, in GPUI

pub mod aside;
pub mod aside_view;
pub mod chart_renderer;
pub mod data_types;
pub mod label_wrap;
pub mod polling;
pub mod rendering;
pub mod scales;
pub mod theme;
pub mod transform;
pub mod transition;

pub use aside::ResponseAside;
pub use aside_view::ResponseAsideView;
pub use chart_renderer::{ChartRenderer, RenderReport};
pub use data_types::{
    build_histogram, ChartConfig, ColorDomain, HistogramEntry, ResponseRecord, Snapshot,
    SnapshotPatch,
};
pub use label_wrap::{wrap_label, TextMeasure};
pub use polling::{PollHandle, PollOutcome, PollingCoordinator, ResponseSource};
pub use scales::integer_ticks;
