//! Well geometry: pixel size per well and pointer -> well mapping.

use super::ContainerRect;
use crate::types::{Dimensions, PlateConfig, WellCoords};

/// Border pixels excluded from the drawable grid area.
const GRID_BORDER: f64 = 2.0;

/// Width (`dx`) and height (`dy`) of a single well in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasMetrics {
    pub dx: f64,
    pub dy: f64,
}

impl CanvasMetrics {
    /// Zero metrics, used while no container is attached.
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// Well size for `dimensions` laid out in `size`, after the axis margins.
    pub fn compute(size: ContainerRect, dimensions: Dimensions, config: &PlateConfig) -> Self {
        let cols = f64::from(dimensions.cols.max(1));
        let rows = f64::from(dimensions.rows.max(1));
        Self {
            dx: (size.width - config.left_offset - GRID_BORDER) / cols,
            dy: (size.height - config.top_offset - GRID_BORDER) / rows,
        }
    }

    /// Same as [`compute`](Self::compute) but degrades to zero without a
    /// container.
    pub fn for_container(
        size: Option<ContainerRect>,
        dimensions: Dimensions,
        config: &PlateConfig,
    ) -> Self {
        size.map_or(Self::ZERO, |size| Self::compute(size, dimensions, config))
    }

    /// Whether a pointer can be mapped to a well.
    pub fn is_usable(self) -> bool {
        self.dx > 0.0 && self.dy > 0.0
    }

    /// Map a client-space pointer position to the well under it. The result
    /// is not bounds-checked: the margin maps to -1 and positions past the
    /// grid map beyond the last row/column.
    pub fn well_at(
        self,
        client_x: f64,
        client_y: f64,
        size: ContainerRect,
        config: &PlateConfig,
    ) -> Option<WellCoords> {
        if !self.is_usable() {
            return None;
        }
        let x = client_x - size.left - config.left_offset;
        let y = client_y - size.top - config.top_offset;
        Some(WellCoords::new(
            floor_to_i32(y / self.dy),
            floor_to_i32(x / self.dx),
        ))
    }
}

#[allow(clippy::cast_possible_truncation)] // clamped to i32 range first
fn floor_to_i32(v: f64) -> i32 {
    if v.is_nan() {
        return 0;
    }
    v.floor().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_metrics() {
        let config = PlateConfig::default();
        let m = CanvasMetrics::compute(
            ContainerRect::new(0.0, 0.0, 146.0, 86.0),
            Dimensions::new(2, 4),
            &config,
        );
        assert_eq!(m.dx, 30.0);
        assert_eq!(m.dy, 30.0);
    }

    #[test]
    fn test_without_container_is_zero() {
        let m = CanvasMetrics::for_container(None, Dimensions::new(8, 12), &PlateConfig::default());
        assert_eq!(m, CanvasMetrics::ZERO);
        assert_eq!(
            m.well_at(50.0, 50.0, ContainerRect::default(), &PlateConfig::default()),
            None
        );
    }

    #[test]
    fn test_well_at_offsets_and_floor() {
        let config = PlateConfig::default();
        let size = ContainerRect::new(100.0, 50.0, 146.0, 86.0);
        let m = CanvasMetrics::compute(size, Dimensions::new(2, 4), &config);
        // first well starts at (124, 74) in client space
        assert_eq!(m.well_at(124.0, 74.0, size, &config), Some(WellCoords::new(0, 0)));
        assert_eq!(m.well_at(183.9, 104.0, size, &config), Some(WellCoords::new(1, 1)));
        assert_eq!(m.well_at(110.0, 60.0, size, &config), Some(WellCoords::new(-1, -1)));
    }
}
