//! Structured error types for plateview.
//!
//! Plate state operations never fail; only DOM acquisition and JS
//! (de)serialization at the browser boundary produce these.

/// All errors that can occur while binding a plate to the DOM.
#[derive(Debug, thiserror::Error)]
pub enum PlateError {
    /// A DOM call threw a JavaScript exception.
    #[error("DOM error: {0}")]
    Dom(String),

    /// No global `window` (not running in a browser main thread).
    #[error("No window available")]
    NoWindow,

    /// The window has no document.
    #[error("No document available")]
    NoDocument,

    /// `getContext("2d")` returned nothing.
    #[error("Canvas 2D context unavailable")]
    CanvasContext,

    /// `mount` was called on a plate that is already mounted.
    #[error("Plate is already mounted")]
    AlreadyMounted,

    /// Invalid JSON configuration.
    #[error("Config: {0}")]
    Config(#[from] serde_json::Error),

    /// JS value conversion failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlateError>;

impl PlateError {
    /// Wrap a thrown JS value.
    pub fn dom(value: &wasm_bindgen::JsValue) -> Self {
        Self::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<serde_wasm_bindgen::Error> for PlateError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<PlateError> for wasm_bindgen::JsValue {
    fn from(e: PlateError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
