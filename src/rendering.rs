// Painting of a reconciled chart onto a GPUI canvas

use crate::chart_renderer::{wrap_labels, CategoryLabel, ChartRenderer};
use crate::data_types::ChartConfig;
use crate::label_wrap::TextMeasure;
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;
use gpui::*;
use std::time::Instant;

const TICK_SIZE: f32 = 6.0;
const TICK_PADDING: f32 = 3.0;

/// Measures text with the window's text system.
pub struct WindowTextMeasure<'a> {
    window: &'a Window,
    font: Font,
    font_size: Pixels,
}

impl<'a> WindowTextMeasure<'a> {
    pub fn new(window: &'a Window, font_size: Pixels) -> Self {
        Self {
            window,
            font: TextStyle::default().font(),
            font_size,
        }
    }
}

impl TextMeasure for WindowTextMeasure<'_> {
    fn measure(&self, text: &str) -> f32 {
        let run = text_run(text, self.font.clone(), gpui::black());
        match self.window.text_system().shape_text(
            SharedString::from(text.to_string()),
            self.font_size,
            &[run],
            None,
            None,
        ) {
            Ok(lines) => lines
                .iter()
                .map(|line| f32::from(line.width()))
                .fold(0.0, f32::max),
            Err(_) => 0.0,
        }
    }
}

fn text_run(text: &str, font: Font, color: Hsla) -> TextRun {
    TextRun {
        len: text.len(),
        font,
        color,
        background_color: None,
        underline: None,
        strikethrough: None,
    }
}

#[derive(Clone, Copy, Debug)]
enum Anchor {
    Start,
    Middle,
    End,
}

/// Paints one line of text with its top edge at `origin.y`.
fn paint_text(
    text: &str,
    origin: Point<Pixels>,
    anchor: Anchor,
    font_size: Pixels,
    color: Hsla,
    window: &mut Window,
    cx: &mut App,
) {
    if text.is_empty() {
        return;
    }
    let run = text_run(text, TextStyle::default().font(), color);
    let Ok(lines) = window.text_system().shape_text(
        SharedString::from(text.to_string()),
        font_size,
        &[run],
        None,
        None,
    ) else {
        return;
    };

    for line in lines {
        let width = line.width();
        let x = match anchor {
            Anchor::Start => origin.x,
            Anchor::Middle => origin.x - width / 2.0,
            Anchor::End => origin.x - width,
        };
        let _ = line.paint(point(x, origin.y), font_size, TextAlign::Left, None, window, cx);
    }
}

fn paint_line(from: Point<Pixels>, to: Point<Pixels>, color: Hsla, window: &mut Window) {
    let mut builder = PathBuilder::stroke(px(1.0));
    builder.move_to(from);
    builder.line_to(to);
    if let Ok(path) = builder.build() {
        window.paint_path(path, color);
    }
}

#[derive(Clone, Debug)]
struct BarFrame {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    fill: Hsla,
}

/// Owned copy of everything painted for one frame, sampled at a point in time
/// so the canvas closure does not borrow the view.
#[derive(Clone, Debug)]
pub struct ChartFrame {
    config: ChartConfig,
    bars: Vec<BarFrame>,
    ticks: Vec<(u32, f32)>,
    labels: Vec<CategoryLabel>,
    message: Option<String>,
}

impl ChartFrame {
    pub fn capture(chart: &ChartRenderer, now: Instant) -> Self {
        Self {
            config: chart.config().clone(),
            bars: chart
                .bars()
                .map(|bar| BarFrame {
                    x: bar.x,
                    y: bar.y_at(now),
                    width: bar.width,
                    height: bar.height_at(now),
                    fill: bar.fill,
                })
                .collect(),
            ticks: chart
                .ticks()
                .iter()
                .map(|tick| (tick.value, tick.y_at(now)))
                .collect(),
            labels: chart.labels().to_vec(),
            message: chart.message().map(str::to_string),
        }
    }
}

pub fn paint_chart(
    frame: &ChartFrame,
    theme: &ChartTheme,
    bounds: Bounds<Pixels>,
    window: &mut Window,
    cx: &mut App,
) {
    let transform = PlotTransform::new(bounds, frame.config.margins);
    paint_bars(frame, &transform, window);
    paint_x_axis(frame, theme, &transform, window, cx);
    paint_y_axis(frame, theme, &transform, window, cx);
    paint_message(frame, theme, &transform, window, cx);
}

fn paint_bars(frame: &ChartFrame, transform: &PlotTransform, window: &mut Window) {
    for bar in &frame.bars {
        if bar.height <= 0.0 || bar.width <= 0.0 {
            continue;
        }
        window.paint_quad(fill(
            transform.rect(bar.x, bar.y, bar.width, bar.height),
            bar.fill,
        ));
    }
}

fn paint_x_axis(
    frame: &ChartFrame,
    theme: &ChartTheme,
    transform: &PlotTransform,
    window: &mut Window,
    cx: &mut App,
) {
    let config = &frame.config;
    let baseline = config.height;
    paint_line(
        transform.to_screen(0.0, baseline),
        transform.to_screen(config.width, baseline),
        theme.axis_line,
        window,
    );

    // Tick text is replaced by the wrapped category labels.
    let font_size = px(config.label_font_size);
    let wrapped = {
        let measure = WindowTextMeasure::new(window, font_size);
        wrap_labels(&frame.labels, config.label_line_height, &measure)
    };

    for label in &wrapped {
        paint_line(
            transform.to_screen(label.center_x, baseline),
            transform.to_screen(label.center_x, baseline + TICK_SIZE),
            theme.axis_line,
            window,
        );
        for (idx, line) in label.lines.iter().enumerate() {
            let y = baseline + label.line_offset(idx, config.label_font_size);
            paint_text(
                &line.text,
                transform.to_screen(label.center_x, y),
                Anchor::Middle,
                font_size,
                theme.axis_label,
                window,
                cx,
            );
        }
    }
}

fn paint_y_axis(
    frame: &ChartFrame,
    theme: &ChartTheme,
    transform: &PlotTransform,
    window: &mut Window,
    cx: &mut App,
) {
    let config = &frame.config;
    paint_line(
        transform.to_screen(0.0, 0.0),
        transform.to_screen(0.0, config.height),
        theme.axis_line,
        window,
    );

    let font_size = px(config.label_font_size);
    for (value, y) in &frame.ticks {
        paint_line(
            transform.to_screen(-TICK_SIZE, *y),
            transform.to_screen(0.0, *y),
            theme.axis_line,
            window,
        );
        paint_text(
            &value.to_string(),
            transform.to_screen(-(TICK_SIZE + TICK_PADDING), *y - config.label_font_size / 2.0),
            Anchor::End,
            font_size,
            theme.axis_label,
            window,
            cx,
        );
    }
}

fn paint_message(
    frame: &ChartFrame,
    theme: &ChartTheme,
    transform: &PlotTransform,
    window: &mut Window,
    cx: &mut App,
) {
    let Some(message) = &frame.message else {
        return;
    };
    let (x, y) = frame.config.message_anchor();
    paint_text(
        message,
        transform.to_screen(x, y),
        Anchor::Start,
        theme.message_size,
        theme.message_text,
        window,
        cx,
    );
}
