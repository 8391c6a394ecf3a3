//! Container geometry and well metrics.
//!
//! This module handles:
//! - The `Container` abstraction over the mount element
//! - Computing well size from container size and plate dimensions
//! - Mapping pointer positions to well coordinates

mod container;
mod metrics;

pub use container::{Container, ContainerRect};
pub use metrics::CanvasMetrics;
