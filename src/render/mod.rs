//! Layer rendering with pluggable surfaces.
//!
//! This module provides:
//! - The `DrawSurface` trait and its Canvas 2D and recording implementations
//! - Per-layer drawing routines (grid, wells, selection overlays)
//! - Label fitting and contrast color utilities
//! - `PlatePainter`, which owns the four layers of one plate

pub mod canvas;
pub mod colors;
mod frame;
pub mod grid;
pub mod layers;
mod painter;
pub mod recording;
pub mod selection;
pub mod surface;
pub mod text;
pub mod wells;

// Re-export commonly used types
pub use canvas::CanvasLayer;
pub use colors::{contrast_foreground, lightness, CssColor, Foreground, LabelPalette};
pub use frame::Frame;
pub use layers::{Layer, LayerSet};
pub use painter::PlatePainter;
pub use recording::{DrawOp, RecordingSurface};
pub use surface::{DrawSurface, Segment, TextAlign, TextBaseline};
