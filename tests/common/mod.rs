//! Shared helpers for driving a plate headlessly.
//!
//! Plates are mounted into a fixed container whose size gives 30×30 px
//! wells for a 2×4 grid with the default 24 px margins.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use plateview::layout::ContainerRect;
use plateview::render::{DrawOp, Layer, LayerSet, RecordingSurface};
use plateview::{Dimensions, Lifecycle, PlateModel, PlateSelection, WellCoords};

/// Container offset in the page so client and layer coordinates differ.
pub const CONTAINER: ContainerRect = ContainerRect::new(10.0, 20.0, 146.0, 86.0);

/// A plate of `rows`×`cols` backed by recording surfaces, not mounted.
pub fn plate(rows: u32, cols: u32) -> PlateModel<RecordingSurface> {
    PlateModel::new(
        Dimensions::new(rows, cols),
        LayerSet::new_with(|_| RecordingSurface::new()),
    )
}

/// A plate mounted into [`CONTAINER`], with the mount-time drawing cleared.
pub fn mounted(rows: u32, cols: u32) -> PlateModel<RecordingSurface> {
    let mut model = plate(rows, cols);
    model.mount(Box::new(CONTAINER));
    clear_ops(&model);
    model
}

/// Client-space center of the well at `(row, col)`.
pub fn well_center(model: &PlateModel<RecordingSurface>, row: i32, col: i32) -> (f64, f64) {
    let metrics = model.metrics();
    let config = model.config();
    (
        CONTAINER.left + config.left_offset + (f64::from(col) + 0.5) * metrics.dx,
        CONTAINER.top + config.top_offset + (f64::from(row) + 0.5) * metrics.dy,
    )
}

/// Press at `from`, move to `to`, release.
pub fn drag(model: &PlateModel<RecordingSurface>, from: (i32, i32), to: (i32, i32)) {
    model.pointer_enter();
    let (x, y) = well_center(model, from.0, from.1);
    model.pointer_down(x, y);
    let (x, y) = well_center(model, to.0, to.1);
    model.pointer_move(x, y);
    model.pointer_up();
}

pub fn block(dimensions: Dimensions, from: (i32, i32), to: (i32, i32)) -> PlateSelection {
    PlateSelection::rect(
        dimensions,
        WellCoords::new(from.0, from.1),
        WellCoords::new(to.0, to.1),
    )
}

pub fn clear_ops(model: &PlateModel<RecordingSurface>) {
    for layer in Layer::ALL {
        model.layer_mut(layer).take_ops();
    }
}

/// Layers that recorded any drawing since the last [`clear_ops`].
pub fn drawn_layers(model: &PlateModel<RecordingSurface>) -> Vec<Layer> {
    Layer::ALL
        .into_iter()
        .filter(|layer| !model.layer(*layer).ops().is_empty())
        .collect()
}

/// Number of `ClearRect` ops on `layer`, i.e. how many times it was redrawn.
pub fn redraws(model: &PlateModel<RecordingSurface>, layer: Layer) -> usize {
    model
        .layer(layer)
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::ClearRect { .. }))
        .count()
}
