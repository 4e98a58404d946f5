//! Projection from chart-local coordinates to window pixels.

use crate::data_types::Margins;
use gpui::*;

/// Maps the plotting area (origin at its top-left corner, margins excluded)
/// into the painted bounds.
#[derive(Clone, Copy, Debug)]
pub struct PlotTransform {
    pub bounds: Bounds<Pixels>,
    pub margins: Margins,
}

impl PlotTransform {
    pub fn new(bounds: Bounds<Pixels>, margins: Margins) -> Self {
        Self { bounds, margins }
    }

    pub fn origin(&self) -> Point<Pixels> {
        self.bounds.origin + point(px(self.margins.left), px(self.margins.top))
    }

    pub fn to_screen(&self, x: f32, y: f32) -> Point<Pixels> {
        self.origin() + point(px(x), px(y))
    }

    pub fn rect(&self, x: f32, y: f32, width: f32, height: f32) -> Bounds<Pixels> {
        Bounds::new(self.to_screen(x, y), size(px(width), px(height)))
    }
}
