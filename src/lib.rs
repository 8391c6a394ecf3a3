//! plateview - interactive plate grid for the web
//!
//! Renders a rows×cols plate (e.g. a 96-well microplate) into stacked
//! Canvas 2D layers via WebAssembly:
//! - Reactive state with synchronous, ordered subscriptions
//! - Rectangular drag selection with hover preview
//! - Per-well fill colors and one- or two-line labels with contrast text
//! - Resize-aware redraw, one layer at a time
//!
//! The state, pointer and drawing logic is plain Rust and runs natively
//! against any [`render::DrawSurface`]; only [`PlateView`] is browser-bound.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { PlateView } from 'plateview';
//! await init();
//! const plate = new PlateView(8, 12);
//! plate.mount(container);
//! plate.update({ colors, labels });
//! ```

pub mod error;
pub mod layout;
pub mod plate;
pub mod reactive;
pub mod render;
pub mod types;

// Browser binding (Canvas 2D, DOM events)
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::{PlateSubscription, PlateView};

pub use error::{PlateError, Result};
pub use plate::PlateModel;
pub use reactive::{Behavior, Lifecycle, Mounted, ReactiveModel, Subscription};
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
