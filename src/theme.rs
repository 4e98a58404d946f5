use gpui::*;

/// Ten-hue categorical palette used for bar fills.
pub const CATEGORY10: [u32; 10] = [
    0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x7f7f7f, 0xbcbd22,
    0x17becf,
];

#[derive(Clone, Debug)]
pub struct ChartTheme {
    pub background: Hsla,
    pub axis_line: Hsla,
    pub axis_label: Hsla,
    pub message_text: Hsla,
    pub message_size: Pixels,
    pub toggle_background: Hsla,
    pub toggle_text: Hsla,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: gpui::white(),
            axis_line: gpui::black(),
            axis_label: gpui::black(),
            message_text: gpui::black().alpha(0.6),
            message_size: px(24.0),
            toggle_background: rgb(0x0075b4).into(),
            toggle_text: gpui::white(),
        }
    }
}
