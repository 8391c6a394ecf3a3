//! Grid layer: dashed interior lines, outer border, row letters and column
//! numbers.

use super::frame::Frame;
use super::surface::{DrawSurface, Segment, TextAlign, TextBaseline};
use crate::types::row_to_label;

/// Dash pattern for interior gridlines.
const GRID_DASH: [f64; 2] = [2.0, 2.0];
/// Gap between row letters and the grid.
const ROW_LABEL_GAP: f64 = 8.0;
/// Gap between column numbers and the grid.
const COL_LABEL_GAP: f64 = 6.0;

/// Interior gridline segments (no outer edges).
pub fn grid_segments(frame: &Frame<'_>) -> Vec<Segment> {
    let left = frame.config.left_offset;
    let top = frame.config.top_offset;
    let Frame {
        size,
        dimensions,
        metrics,
        ..
    } = *frame;

    let rows = (1..dimensions.rows).map(|row| {
        let y = top + 0.5 + f64::from(row) * metrics.dy;
        Segment {
            from: (left, y),
            to: (size.width, y),
        }
    });
    let cols = (1..dimensions.cols).map(|col| {
        let x = left + 0.5 + f64::from(col) * metrics.dx;
        Segment {
            from: (x, top),
            to: (x, size.height),
        }
    });
    rows.chain(cols).collect()
}

/// Axis label font size: bounded by the column width.
pub fn axis_label_size(frame: &Frame<'_>) -> f64 {
    frame
        .config
        .max_label_size
        .min(3.0 * frame.metrics.dx / 5.0)
}

pub fn draw_grid<S: DrawSurface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    let config = frame.config;
    let left = config.left_offset;
    let top = config.top_offset;
    let (dx, dy) = (frame.metrics.dx, frame.metrics.dy);

    frame.clear(surface);

    surface.set_line_dash(&GRID_DASH);
    surface.set_line_width(1.0);
    surface.set_stroke_style(&config.grid_line_color);
    surface.stroke_segments(&grid_segments(frame));

    surface.set_line_dash(&[]);
    surface.set_stroke_style(&config.border_color);
    surface.set_line_width(1.0);
    surface.stroke_rect(
        left,
        top,
        frame.size.width - left - 1.0,
        frame.size.height - top - 1.0,
    );

    surface.set_font(&config.font(axis_label_size(frame)));
    surface.set_text_align(TextAlign::Right);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.set_fill_style(&config.axis_label_color);
    for row in 0..frame.dimensions.rows {
        surface.fill_text(
            &row_to_label(row),
            left - ROW_LABEL_GAP,
            top + 1.0 + f64::from(row) * dy + dy / 2.0,
        );
    }

    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Bottom);
    for col in 0..frame.dimensions.cols {
        surface.fill_text(
            &(col + 1).to_string(),
            left + 1.0 + f64::from(col) * dx + dx / 2.0,
            top - COL_LABEL_GAP,
        );
    }
}
