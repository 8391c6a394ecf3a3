//! Selection and highlight overlay layers.

use super::frame::Frame;
use super::surface::DrawSurface;
use crate::types::PlateSelection;

/// Paint one translucent rectangle per selected well.
pub fn draw_selection<S: DrawSurface + ?Sized>(
    surface: &mut S,
    frame: &Frame<'_>,
    selection: &PlateSelection,
    color: &str,
) {
    frame.clear(surface);
    surface.set_fill_style(color);

    for index in selection.indices() {
        let Some((row, col)) = frame.dimensions.coords_of(index) else {
            break;
        };
        let (x, y) = frame.well_origin(row, col);
        surface.fill_rect(x + 0.5, y + 0.5, frame.metrics.dx, frame.metrics.dy);
    }
}
