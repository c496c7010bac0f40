//! Structured error types for chartbands.
//!
//! Hooks never return these to the host chart. They are downgraded to
//! warnings by [`crate::diagnostics`] and paired with a visual fallback.
//! Only configuration parsing surfaces a `Result` to callers.

/// All errors that can occur while resolving, building or drawing bands.
#[derive(Debug, thiserror::Error)]
pub enum BandsError {
    /// The host chart type has no gradient target.
    #[error("chart type `{0}` is not supported by chartbands")]
    UnsupportedChartType(String),

    /// A band's `color` has the wrong shape for the active mode.
    #[error("band {band} has no usable color for dataset {dataset}")]
    InvalidColorDescriptor { band: usize, dataset: usize },

    /// A band asked for a rule line without a numeric `yValue`.
    #[error("band {band} requires a numeric yValue to draw its line")]
    MissingYValue { band: usize },

    /// The drawing surface rejected a color string.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The drawing surface rejected a gradient stop offset.
    #[error("color stop offset {0} is outside [0, 1]")]
    StopOffset(f64),

    /// Building the gradient failed; the caller falls back to a flat color.
    #[error("gradient construction failed: {0}")]
    GradientConstruction(String),

    /// Malformed band configuration.
    #[error("configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The host chart object could not be read.
    #[error("host chart: {0}")]
    Host(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BandsError>;

impl From<String> for BandsError {
    fn from(s: String) -> Self {
        Self::Host(s)
    }
}

impl From<&str> for BandsError {
    fn from(s: &str) -> Self {
        Self::Host(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<BandsError> for wasm_bindgen::JsValue {
    fn from(e: BandsError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
