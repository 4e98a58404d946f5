//! Manual word wrapping for category labels under the x axis.

/// Reports the rendered width of a text fragment in the current font.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f32,
{
    fn measure(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Vertical offset of the first line under the tick anchor, in ems.
pub const FIRST_LINE_DY_EM: f32 = 0.71;
/// Distance from the axis line to the label anchor (tick size plus padding).
pub const LABEL_ANCHOR_Y: f32 = 9.0;

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Words are never broken: a word that alone exceeds `max_width` gets its own
/// line. Whitespace-only input produces no lines.
pub fn wrap_label(text: &str, max_width: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure.measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// One positioned line of a wrapped label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelLine {
    pub text: String,
    /// Offset below the label anchor, in ems of the label font.
    pub dy_em: f32,
}

/// A wrapped x-axis label centred under its band.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedLabel {
    pub answer_id: String,
    pub center_x: f32,
    pub lines: Vec<LabelLine>,
}

impl WrappedLabel {
    /// Distance from the axis line to the top of line `index`, in pixels.
    pub fn line_offset(&self, index: usize, font_size: f32) -> f32 {
        self.lines
            .get(index)
            .map(|line| LABEL_ANCHOR_Y + (line.dy_em - FIRST_LINE_DY_EM) * font_size)
            .unwrap_or(LABEL_ANCHOR_Y)
    }
}

/// Wraps `text` and stacks the lines `line_height` ems apart.
pub fn layout_label(
    answer_id: &str,
    text: &str,
    center_x: f32,
    max_width: f32,
    line_height: f32,
    measure: &dyn TextMeasure,
) -> WrappedLabel {
    let lines = wrap_label(text, max_width, measure)
        .into_iter()
        .enumerate()
        .map(|(idx, text)| LabelLine {
            text,
            dy_em: idx as f32 * line_height + FIRST_LINE_DY_EM,
        })
        .collect();

    WrappedLabel {
        answer_id: answer_id.to_string(),
        center_x,
        lines,
    }
}
