//! Warning sink for recoverable band failures.
//!
//! Every failure inside a hook ends up here: it is logged as a `tracing`
//! event, echoed to the browser console on wasm32, and kept until the host
//! drains it.
//!
//! Hooks run on every redraw, so the same failure repeats each frame. A
//! warning already in the buffer is not recorded or logged again, and the
//! buffer holds at most [`MAX_WARNINGS`] entries, dropping the oldest.

use crate::error::BandsError;

/// Most warnings kept between two drains.
pub const MAX_WARNINGS: usize = 64;

/// Per-chart record of warnings raised by band hooks.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<BandsError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `error` and keep it for [`Diagnostics::take`].
    ///
    /// Does nothing if an identical warning is still buffered.
    pub fn warn(&mut self, error: BandsError) {
        let message = error.to_string();
        if self.warnings.iter().any(|w| w.to_string() == message) {
            return;
        }

        match &error {
            BandsError::UnsupportedChartType(chart_type) => {
                tracing::warn!(target: "chartbands", %chart_type, "{error}");
            }
            BandsError::InvalidColorDescriptor { band, dataset } => {
                tracing::warn!(target: "chartbands", band, dataset, "ConfigError: {error}");
            }
            BandsError::MissingYValue { band } => {
                tracing::warn!(target: "chartbands", band, "ConfigError: {error}");
            }
            _ => tracing::warn!(target: "chartbands", "{error}"),
        }

        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&format!(
            "chartbands: {message}"
        )));

        if self.warnings.len() >= MAX_WARNINGS {
            self.warnings.remove(0);
        }
        self.warnings.push(error);
    }

    pub fn warnings(&self) -> &[BandsError] {
        &self.warnings
    }

    /// Remove and return every warning recorded so far.
    pub fn take(&mut self) -> Vec<BandsError> {
        std::mem::take(&mut self.warnings)
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}
