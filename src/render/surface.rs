//! Drawing surface trait for pluggable canvas implementations.
//!
//! This module defines the `DrawingSurface` trait that abstracts the 2-D
//! drawing calls bands need, allowing a browser canvas and the headless
//! recorder to be used interchangeably.

use crate::error::Result;

/// A linear gradient under construction.
pub trait LinearGradient {
    /// Append a color stop.
    ///
    /// # Errors
    /// Returns an error if the surface rejects the offset or the color.
    fn add_color_stop(&mut self, offset: f64, color: &str) -> Result<()>;
}

/// The 2-D drawing primitives used by band renderers.
pub trait DrawingSurface {
    type Gradient: LinearGradient;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn set_line_width(&mut self, width: f64);
    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_font(&mut self, font: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Create a gradient along the line `(x0, y0)` to `(x1, y1)`.
    fn create_linear_gradient(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Self::Gradient;
}
