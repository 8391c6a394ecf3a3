//! Geometry snapshot shared by the layer drawing routines.

use crate::layout::{CanvasMetrics, ContainerRect};
use crate::types::{Dimensions, PlateConfig};

/// Everything a draw routine needs to place wells on a layer.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub size: ContainerRect,
    pub dimensions: Dimensions,
    pub metrics: CanvasMetrics,
    pub config: &'a PlateConfig,
}

impl Frame<'_> {
    /// Top-left corner of a well in layer pixels.
    pub fn well_origin(&self, row: u32, col: u32) -> (f64, f64) {
        (
            self.config.left_offset + f64::from(col) * self.metrics.dx,
            self.config.top_offset + f64::from(row) * self.metrics.dy,
        )
    }

    /// Clear the whole layer.
    pub fn clear<S: super::DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }
}
