//! Data types for the plate viewer.

mod config;
mod dimensions;
mod label;
mod selection;
mod state;

pub use config::*;
pub use dimensions::*;
pub use label::*;
pub use selection::*;
pub use state::*;
