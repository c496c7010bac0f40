//! Canvas 2D drawing surface.
//!
//! Implements the `DrawingSurface` trait using the HTML Canvas 2D API via
//! web-sys. `addColorStop` throws on a bad offset or color; that exception
//! comes back as an `Err` here.

use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::error::{BandsError, Result};

use super::surface::{DrawingSurface, LinearGradient};

impl LinearGradient for CanvasGradient {
    #[allow(clippy::cast_possible_truncation)]
    fn add_color_stop(&mut self, offset: f64, color: &str) -> Result<()> {
        CanvasGradient::add_color_stop(self, offset as f32, color)
            .map_err(|_| BandsError::InvalidColor(color.to_string()))
    }
}

/// Canvas 2D surface wrapping a rendering context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl DrawingSurface for CanvasSurface {
    type Gradient = CanvasGradient;

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn create_linear_gradient(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> CanvasGradient {
        self.ctx.create_linear_gradient(x0, y0, x1, y1)
    }
}
