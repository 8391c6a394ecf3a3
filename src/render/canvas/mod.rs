//! Canvas 2D layer backend.
//!
//! Each plate layer is its own `<canvas>` drawn through the HTML Canvas 2D
//! API via web-sys; the browser composites the stack.

mod layer;

pub use layer::CanvasLayer;
