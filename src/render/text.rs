//! Width-fitted label text.

use super::surface::DrawSurface;

/// Share of the well width text may occupy before it is scaled down.
pub const FIT_RATIO: f64 = 0.8;

/// Uniform scale that fits `text_width` into [`FIT_RATIO`] of `max_width`,
/// never enlarging.
pub fn fit_scale(text_width: f64, max_width: f64) -> f64 {
    if text_width <= 0.0 {
        return 1.0;
    }
    (FIT_RATIO * max_width / text_width).min(1.0)
}

/// Draw `text` anchored at `(x, y)` with the surface's current font and
/// alignment, shrinking it uniformly if it would overflow. Returns the
/// unscaled text width.
pub fn draw_fitted_text<S: DrawSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    x: f64,
    y: f64,
    max_width: f64,
) -> f64 {
    let width = surface.measure_text(text);
    let scale = fit_scale(width, max_width);
    if scale >= 1.0 {
        surface.fill_text(text, x, y);
    } else if scale > 0.0 {
        // the anchor must stay put, so pre-divide by the scale
        surface.save();
        surface.scale(scale, scale);
        surface.fill_text(text, x / scale, y / scale);
        surface.restore();
    }
    width
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawOp, RecordingSurface};

    #[test]
    fn test_fit_scale() {
        assert_eq!(fit_scale(10.0, 100.0), 1.0);
        assert_eq!(fit_scale(100.0, 50.0), 0.4);
        assert_eq!(fit_scale(0.0, 50.0), 1.0);
    }

    #[test]
    fn test_overflowing_text_is_scaled_not_clipped() {
        let mut surface = RecordingSurface::new();
        surface.set_font("10px monospace");
        // 10 chars * 6px = 60px into a 30px well -> 0.8 * 30 / 60 = 0.4
        let width = draw_fitted_text(&mut surface, "0123456789", 20.0, 8.0, 30.0);
        assert!((width - 60.0).abs() < 1e-9);
        match &surface.ops()[0] {
            DrawOp::FillText { text, x, y, scale, .. } => {
                assert_eq!(text, "0123456789");
                assert!((scale - 0.4).abs() < 1e-9);
                // device position = local * scale
                assert!((x * scale - 20.0).abs() < 1e-9);
                assert!((y * scale - 8.0).abs() < 1e-9);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_short_text_drawn_as_is() {
        let mut surface = RecordingSurface::new();
        surface.set_font("10px monospace");
        draw_fitted_text(&mut surface, "ab", 5.0, 5.0, 100.0);
        assert_eq!(
            surface.ops()[0],
            DrawOp::FillText {
                text: "ab".into(),
                x: 5.0,
                y: 5.0,
                font: "10px monospace".into(),
                color: "#000000".into(),
                scale: 1.0
            }
        );
    }
}
