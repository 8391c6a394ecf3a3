//! Recording surface for headless rendering and tests.
//!
//! Stores every draw call as a [`DrawOp`] instead of rasterizing. Text width
//! is approximated from the current font size so overflow scaling behaves
//! like a monospace canvas font.

use super::surface::{DrawSurface, Segment, TextAlign, TextBaseline};

/// Width of one monospace glyph relative to the font size.
const GLYPH_ASPECT: f64 = 0.6;
/// Font size assumed until `set_font` is called (canvas default is 10px).
const DEFAULT_FONT_SIZE: f64 = 10.0;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Resize { width: f64, height: f64 },
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    FillRect { x: f64, y: f64, w: f64, h: f64, color: String },
    StrokeRect { x: f64, y: f64, w: f64, h: f64, color: String },
    StrokeSegments { segments: Vec<Segment>, color: String, dash: Vec<f64> },
    FillText { text: String, x: f64, y: f64, font: String, color: String, scale: f64 },
}

#[derive(Debug, Clone)]
struct DrawState {
    fill: String,
    stroke: String,
    line_width: f64,
    dash: Vec<f64>,
    font: String,
    align: TextAlign,
    baseline: TextBaseline,
    scale: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            line_width: 1.0,
            dash: Vec::new(),
            font: format!("{DEFAULT_FONT_SIZE}px sans-serif"),
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
            scale: 1.0,
        }
    }
}

/// A `DrawSurface` that records instead of painting.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Everything drawn since creation or the last [`take_ops`](Self::take_ops).
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded ops.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Recorded `FillRect` ops, as `(x, y, w, h, color)`.
    pub fn fills(&self) -> Vec<(f64, f64, f64, f64, &str)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { x, y, w, h, color } => Some((*x, *y, *w, *h, color.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Recorded text, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Current text alignment (for asserting layout setup).
    pub fn text_align(&self) -> TextAlign {
        self.state.align
    }

    pub fn text_baseline(&self) -> TextBaseline {
        self.state.baseline
    }

    pub fn line_width(&self) -> f64 {
        self.state.line_width
    }

    fn font_size(&self) -> f64 {
        font_size_px(&self.state.font).unwrap_or(DEFAULT_FONT_SIZE)
    }
}

/// Extract the pixel size from a CSS font shorthand such as `12px monospace`.
pub fn font_size_px(font: &str) -> Option<f64> {
    font.split_whitespace()
        .find_map(|part| part.strip_suffix("px"))
        .and_then(|size| size.parse().ok())
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0).floor();
        self.height = height.max(0.0).floor();
        self.state = DrawState::default();
        self.stack.clear();
        self.ops.push(DrawOp::Resize {
            width: self.width,
            height: self.height,
        });
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::ClearRect { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let color = self.state.fill.clone();
        self.ops.push(DrawOp::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let color = self.state.stroke.clone();
        self.ops.push(DrawOp::StrokeRect { x, y, w, h, color });
    }

    fn stroke_segments(&mut self, segments: &[Segment]) {
        self.ops.push(DrawOp::StrokeSegments {
            segments: segments.to_vec(),
            color: self.state.stroke.clone(),
            dash: self.state.dash.clone(),
        });
    }

    fn set_fill_style(&mut self, color: &str) {
        self.state.fill = color.to_string();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.state.stroke = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.state.dash = segments.to_vec();
    }

    fn set_font(&mut self, font: &str) {
        self.state.font = font.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            font: self.state.font.clone(),
            color: self.state.fill.clone(),
            scale: self.state.scale,
        });
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size() * GLYPH_ASPECT
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn scale(&mut self, x: f64, _y: f64) {
        self.state.scale *= x;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_px() {
        assert_eq!(font_size_px("12px monospace"), Some(12.0));
        assert_eq!(font_size_px("bold 7.5px serif"), Some(7.5));
        assert_eq!(font_size_px("monospace"), None);
    }

    #[test]
    fn test_measure_uses_current_font() {
        let mut surface = RecordingSurface::new();
        surface.set_font("10px monospace");
        assert!((surface.measure_text("abcd") - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_save_restore_scale() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.scale(0.5, 0.5);
        surface.fill_text("a", 1.0, 2.0);
        surface.restore();
        surface.fill_text("b", 1.0, 2.0);
        let scales: Vec<f64> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { scale, .. } => Some(*scale),
                _ => None,
            })
            .collect();
        assert_eq!(scales, vec![0.5, 1.0]);
    }
}
