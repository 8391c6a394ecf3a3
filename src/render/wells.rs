//! Wells layer: fill colors and one- or two-line labels.

use super::colors::{Foreground, LabelPalette};
use super::frame::Frame;
use super::surface::{DrawSurface, TextAlign, TextBaseline};
use super::text::draw_fitted_text;
use crate::types::{LabelLayout, PlateState};

/// Fill assumed under a label when the well has no color.
const UNFILLED: &str = "black";

/// Font sizes for the three label placements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelFonts {
    pub single: f64,
    pub header: f64,
    pub main: f64,
}

impl LabelFonts {
    /// Header gets a third of the well height, main two thirds, both capped.
    pub fn for_frame(frame: &Frame<'_>) -> Self {
        let max = frame.config.max_label_size;
        let dy = frame.metrics.dy;
        Self {
            single: max,
            header: (dy / 3.0 - 2.0).min(max).max(1.0),
            main: (2.0 * dy / 3.0 - 2.0).min(max).max(1.0),
        }
    }
}

pub fn draw_wells<S: DrawSurface + ?Sized>(
    surface: &mut S,
    frame: &Frame<'_>,
    state: &PlateState,
    palette: &mut LabelPalette,
) {
    let config = frame.config;
    let (dx, dy) = (frame.metrics.dx, frame.metrics.dy);

    frame.clear(surface);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);

    let fonts = LabelFonts::for_frame(frame);
    let single_font = config.font(fonts.single);
    let header_font = config.font(fonts.header);
    let main_font = config.font(fonts.main);

    for index in 0..frame.dimensions.size() {
        let Some((row, col)) = frame.dimensions.coords_of(index) else {
            break;
        };
        let color = state.colors.get(index).and_then(Option::as_ref);
        let label = state.labels.get(index).and_then(Option::as_ref);
        let (x0, y0) = frame.well_origin(row, col);

        if let Some(color) = color {
            surface.set_fill_style(color);
            surface.fill_rect(x0, y0, dx + 0.5, dy + 0.5);
        }

        let Some(label) = label else {
            continue;
        };
        let fill = color.map_or(UNFILLED, String::as_str);
        let foreground = match palette.foreground(fill) {
            Foreground::Dark => &config.label_dark,
            Foreground::Light => &config.label_light,
        };
        surface.set_fill_style(foreground);

        let x = x0 + dx / 2.0;
        match label.layout() {
            Some(LabelLayout::Split { header, main }) => {
                surface.set_font(&header_font);
                draw_fitted_text(surface, header, x, y0 + dy / 6.0 + 2.0, dx);
                surface.set_font(&main_font);
                draw_fitted_text(surface, main, x, y0 + 2.0 * dy / 3.0, dx);
            }
            Some(LabelLayout::Single(line)) => {
                surface.set_font(&single_font);
                draw_fitted_text(surface, line, x, y0 + dy / 2.0, dx);
            }
            None => {}
        }
    }
}
