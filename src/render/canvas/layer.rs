//! Canvas 2D layer surface.
//!
//! Implements `DrawSurface` on top of an absolutely positioned `<canvas>`
//! and its `CanvasRenderingContext2d` via web-sys.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use crate::error::{PlateError, Result};
use crate::render::surface::{DrawSurface, Segment, TextAlign, TextBaseline};

/// One stacked drawing layer backed by its own canvas element.
#[derive(Clone)]
pub struct CanvasLayer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasLayer {
    /// Create a detached canvas that fills its positioned parent and lets
    /// pointer events fall through to it.
    pub fn new(document: &Document) -> Result<Self> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| PlateError::dom(&e))?
            .dyn_into()
            .map_err(|_| PlateError::Dom("created element is not a canvas".to_string()))?;

        let style = canvas.style();
        for (property, value) in [
            ("position", "absolute"),
            ("left", "0px"),
            ("right", "0px"),
            ("top", "0px"),
            ("bottom", "0px"),
            ("pointer-events", "none"),
        ] {
            style
                .set_property(property, value)
                .map_err(|e| PlateError::dom(&e))?;
        }

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| PlateError::dom(&e))?
            .ok_or(PlateError::CanvasContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlateError::CanvasContext)?;

        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Append the canvas as the last child of `parent` (top of the stack).
    pub fn attach(&self, parent: &Element) -> Result<()> {
        parent
            .append_child(&self.canvas)
            .map_err(|e| PlateError::dom(&e))?;
        Ok(())
    }

    /// Remove the canvas from the DOM, if attached.
    pub fn detach(&self) {
        self.canvas.remove();
    }
}

impl DrawSurface for CanvasLayer {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to >= 0
    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0).floor() as u32);
        self.canvas.set_height(height.max(0.0).floor() as u32);
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.stroke_rect(x, y, w, h);
    }

    fn stroke_segments(&mut self, segments: &[Segment]) {
        self.ctx.begin_path();
        for segment in segments {
            self.ctx.move_to(segment.from.0, segment.from.1);
            self.ctx.line_to(segment.to.0, segment.to.1);
        }
        self.ctx.stroke();
        self.ctx.close_path();
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        let dash: js_sys::Array = segments.iter().copied().map(JsValue::from_f64).collect();
        if let Err(e) = self.ctx.set_line_dash(&dash) {
            log::warn!("setLineDash rejected {segments:?}: {e:?}");
        }
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_css());
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_css());
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if let Err(e) = self.ctx.fill_text(text, x, y) {
            log::warn!("fillText failed for {text:?}: {e:?}");
        }
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0)
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn scale(&mut self, x: f64, y: f64) {
        if let Err(e) = self.ctx.scale(x, y) {
            log::warn!("scale({x}, {y}) failed: {e:?}");
        }
    }
}
