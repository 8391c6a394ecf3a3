//! The element a plate is mounted into.

/// Container bounds in client (viewport) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Opaque handle to the surface the plate is mounted into; only its live
/// geometry is needed.
pub trait Container {
    /// Current bounding rectangle (may change between calls on scroll or
    /// resize).
    fn bounding_rect(&self) -> ContainerRect;
}

impl Container for ContainerRect {
    fn bounding_rect(&self) -> ContainerRect {
        *self
    }
}

impl Container for std::rc::Rc<std::cell::Cell<ContainerRect>> {
    fn bounding_rect(&self) -> ContainerRect {
        self.get()
    }
}

impl Container for web_sys::Element {
    fn bounding_rect(&self) -> ContainerRect {
        let rect = self.get_bounding_client_rect();
        ContainerRect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}
