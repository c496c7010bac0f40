//! chartbands - horizontal reference bands for 2-D charts
//!
//! Decorates an existing chart at render time via WebAssembly and Canvas 2D:
//! - Shaded band backgrounds between two axis values
//! - Solid or dashed rule lines with optional labels
//! - Dataset strokes and fills recolored by gradients that switch color at band edges
//! - Warnings instead of exceptions; a bad band never stops the chart rendering
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { ChartBands } from 'chartbands';
//! await init();
//! const bands = new ChartBands({ bands: [{ from: 0, to: 10, yValue: 5, color: 'green' }] });
//! Chart.pluginService.register({
//!   beforeInit: (chart) => bands.beforeInit(chart),
//!   afterScaleUpdate: (chart) => bands.afterScaleUpdate(chart),
//!   beforeDraw: (chart) => bands.beforeDraw(chart),
//!   destroy: (chart) => bands.destroy(chart),
//! });
//! ```

// Band model and math
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod types;

// Host chart binding and rendering
pub mod host;
pub mod plugin;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use wasm_bindgen::prelude::*;

pub use error::{BandsError, Result};
pub use gradient::{Fill, GradientStop, GradientStopBuilder};
pub use host::{ChartHost, StaticChart};
pub use plugin::{BandsPlugin, PluginState};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use wasm::ChartBands;

/// Resolve band options against the defaults and return them as JSON
///
/// # Arguments
/// * `options_json` - Band options (`{ mode, bands, defaults }`) as JSON
///
/// # Errors
/// Returns an error if the options are not valid JSON of the right shape.
#[wasm_bindgen]
pub fn resolve_bands(options_json: &str) -> std::result::Result<String, JsValue> {
    let config =
        BandsConfig::from_json(options_json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&config.resolved_bands())
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
