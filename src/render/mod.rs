//! Band rendering with pluggable drawing surfaces.
//!
//! This module provides:
//! - The `DrawingSurface` trait abstracting 2-D drawing calls
//! - Canvas 2D surface (browser, via web-sys)
//! - Recording surface (headless, for tests and the CLI)
//! - Rule line, label and background renderers
//! - CSS color validation

pub mod background;
pub mod canvas;
pub mod colors;
pub mod lines;
pub mod recording;
pub mod surface;

// Re-export commonly used types
pub use background::draw_band_background;
pub use canvas::CanvasSurface;
pub use colors::{is_valid_css_color, CssColor, CHART_DEFAULT_COLOR};
pub use lines::{draw_band_line, draw_label, draw_rule_line};
pub use recording::{DrawCommand, RecordedGradient, RecordingSurface};
pub use surface::{DrawingSurface, LinearGradient};
