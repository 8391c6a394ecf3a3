//! Owns a plate's layer surfaces and the geometry they are drawn with.

use super::colors::LabelPalette;
use super::frame::Frame;
use super::grid::draw_grid;
use super::layers::{Layer, LayerSet};
use super::selection::draw_selection;
use super::surface::DrawSurface;
use super::wells::draw_wells;
use crate::layout::{CanvasMetrics, ContainerRect};
use crate::types::{Dimensions, PlateConfig, PlateState};

/// Layer surfaces plus the container size and well metrics they are drawn
/// against. Every draw routine is a no-op until a size is known.
pub struct PlatePainter<S> {
    layers: LayerSet<S>,
    config: PlateConfig,
    size: Option<ContainerRect>,
    metrics: CanvasMetrics,
    palette: LabelPalette,
}

impl<S: DrawSurface> PlatePainter<S> {
    pub fn new(layers: LayerSet<S>, config: PlateConfig) -> Self {
        Self {
            layers,
            config,
            size: None,
            metrics: CanvasMetrics::ZERO,
            palette: LabelPalette::new(),
        }
    }

    pub fn config(&self) -> &PlateConfig {
        &self.config
    }

    pub fn size(&self) -> Option<ContainerRect> {
        self.size
    }

    pub fn metrics(&self) -> CanvasMetrics {
        self.metrics
    }

    pub fn layer(&self, layer: Layer) -> &S {
        self.layers.get(layer)
    }

    pub fn layer_mut(&mut self, layer: Layer) -> &mut S {
        self.layers.get_mut(layer)
    }

    pub fn layers(&self) -> &LayerSet<S> {
        &self.layers
    }

    pub fn palette(&self) -> &LabelPalette {
        &self.palette
    }

    /// Record the container size (or its absence) and recompute metrics for
    /// `dimensions`.
    pub fn set_geometry(&mut self, size: Option<ContainerRect>, dimensions: Dimensions) {
        self.size = size;
        self.metrics = CanvasMetrics::for_container(size, dimensions, &self.config);
    }

    /// Recreate every layer's pixel buffer at the container size.
    pub fn resize_surfaces(&mut self) {
        let Some(size) = self.size else {
            return;
        };
        for layer in Layer::ALL {
            self.layers.get_mut(layer).resize(size.width, size.height);
        }
    }

    pub fn draw_grid(&mut self, state: &PlateState) {
        let Some(size) = self.size else {
            return;
        };
        let frame = Frame {
            size,
            dimensions: state.dimensions,
            metrics: self.metrics,
            config: &self.config,
        };
        draw_grid(&mut self.layers.grid, &frame);
    }

    pub fn draw_wells(&mut self, state: &PlateState) {
        let Some(size) = self.size else {
            return;
        };
        let frame = Frame {
            size,
            dimensions: state.dimensions,
            metrics: self.metrics,
            config: &self.config,
        };
        draw_wells(&mut self.layers.wells, &frame, state, &mut self.palette);
    }

    pub fn draw_selection(&mut self, state: &PlateState) {
        let Some(size) = self.size else {
            return;
        };
        let frame = Frame {
            size,
            dimensions: state.dimensions,
            metrics: self.metrics,
            config: &self.config,
        };
        draw_selection(
            &mut self.layers.select,
            &frame,
            &state.selection,
            &self.config.select_color,
        );
    }

    pub fn draw_highlight(&mut self, state: &PlateState) {
        let Some(size) = self.size else {
            return;
        };
        let frame = Frame {
            size,
            dimensions: state.dimensions,
            metrics: self.metrics,
            config: &self.config,
        };
        draw_selection(
            &mut self.layers.highlight,
            &frame,
            &state.highlight,
            &self.config.highlight_color,
        );
    }

    /// Redraw all four layers.
    pub fn draw_all(&mut self, state: &PlateState) {
        self.draw_grid(state);
        self.draw_wells(state);
        self.draw_selection(state);
        self.draw_highlight(state);
    }
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
    use crate::types::{PlateSelection, WellCoords, WellLabel};

    fn painter() -> PlatePainter<RecordingSurface> {
        let mut painter =
            PlatePainter::new(LayerSet::new_with(|_| RecordingSurface::new()), PlateConfig::default());
        // 4 cols x 2 rows of 30px wells
        painter.set_geometry(
            Some(ContainerRect::new(0.0, 0.0, 146.0, 86.0)),
            Dimensions::new(2, 4),
        );
        painter
    }

    #[test]
    fn test_unsized_painter_draws_nothing() {
        let mut painter =
            PlatePainter::new(LayerSet::new_with(|_| RecordingSurface::new()), PlateConfig::default());
        painter.draw_all(&PlateState::empty(Dimensions::new(2, 2)));
        for layer in Layer::ALL {
            assert!(painter.layer(layer).ops().is_empty());
        }
    }

    #[test]
    fn test_grid_lines_border_and_axis_labels() {
        let mut painter = painter();
        painter.draw_grid(&PlateState::empty(Dimensions::new(2, 4)));
        let grid = painter.layer(Layer::Grid);
        assert_eq!(grid.ops()[0], DrawOp::ClearRect { x: 0.0, y: 0.0, w: 146.0, h: 86.0 });
        let segments = grid
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::StrokeSegments { segments, dash, .. } => Some((segments.len(), dash.clone())),
                _ => None,
            })
            .unwrap();
        // 1 interior row line + 3 interior column lines
        assert_eq!(segments, (4, vec![2.0, 2.0]));
        assert_eq!(grid.texts(), vec!["A", "B", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_selection_rects_offset_half_pixel() {
        let mut painter = painter();
        let dims = Dimensions::new(2, 4);
        let mut state = PlateState::empty(dims);
        state.selection = PlateSelection::rect(dims, WellCoords::new(1, 2), WellCoords::new(1, 2));
        painter.draw_selection(&state);
        let fills = painter.layer(Layer::Select).fills();
        assert_eq!(fills.len(), 1);
        let (x, y, w, h, color) = fills[0];
        assert_eq!((x, y, w, h), (24.0 + 60.0 + 0.5, 24.0 + 30.0 + 0.5, 30.0, 30.0));
        assert_eq!(color, PlateConfig::default().select_color);
    }

    #[test]
    fn test_wells_fill_and_contrast_label() {
        let mut painter = painter();
        let dims = Dimensions::new(2, 4);
        let mut state = PlateState::empty(dims);
        state.colors[0] = Some("#000000".into());
        state.labels[0] = Some(WellLabel::text("x"));
        state.colors[1] = Some("#ffffff".into());
        state.labels[1] = Some(WellLabel::two_line("h", "m"));
        painter.draw_wells(&state);

        let wells = painter.layer(Layer::Wells);
        let texts: Vec<(String, String)> = wells
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, color, .. } => Some((text.clone(), color.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                ("x".to_string(), "white".to_string()),
                ("h".to_string(), "black".to_string()),
                ("m".to_string(), "black".to_string()),
            ]
        );
        assert_eq!(painter.palette().len(), 2);
    }
}
