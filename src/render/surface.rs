//! Drawing surface trait for pluggable 2D backends.
//!
//! This module defines the `DrawSurface` trait that abstracts the handful of
//! immediate-mode operations the plate layers need, so the same drawing
//! routines run against an HTML canvas or a recording surface.

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

impl TextBaseline {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// A straight line from `from` to `to`, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Trait for layer surfaces
///
/// One implementation per drawing technology. Every layer owns exactly one
/// surface and clears only its own pixels before repainting.
pub trait DrawSurface {
    /// Recreate the pixel buffer at the given size (clears it).
    fn resize(&mut self, width: f64, height: f64);

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Stroke all segments as a single path.
    fn stroke_segments(&mut self, segments: &[Segment]);

    fn set_fill_style(&mut self, color: &str);

    fn set_stroke_style(&mut self, color: &str);

    fn set_line_width(&mut self, width: f64);

    /// Empty slice for solid lines.
    fn set_line_dash(&mut self, segments: &[f64]);

    /// CSS font shorthand, e.g. `12px monospace`.
    fn set_font(&mut self, font: &str);

    fn set_text_align(&mut self, align: TextAlign);

    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f64;

    fn save(&mut self);

    fn restore(&mut self);

    fn scale(&mut self, x: f64, y: f64);
}
