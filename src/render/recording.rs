//! Headless drawing surface.
//!
//! Records every draw call so band rendering can be inspected without a
//! browser. Gradient stops are validated the way a browser canvas does:
//! offsets must lie in `[0, 1]` and colors must parse as CSS colors.

use serde::Serialize;

use crate::error::{BandsError, Result};
use crate::gradient::GradientStop;

use super::colors::is_valid_css_color;
use super::surface::{DrawingSurface, LinearGradient};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
    Stroke,
    Fill,
    SetLineWidth { width: f64 },
    SetStrokeStyle { color: String },
    SetFillStyle { color: String },
    SetFont { font: String },
    FillText { text: String, x: f64, y: f64 },
    CreateLinearGradient { x0: f64, y0: f64, x1: f64, y1: f64 },
}

/// A gradient built on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient for RecordedGradient {
    fn add_color_stop(&mut self, offset: f64, color: &str) -> Result<()> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(BandsError::StopOffset(offset));
        }
        if !is_valid_css_color(color) {
            return Err(BandsError::InvalidColor(color.to_string()));
        }
        self.stops.push(GradientStop {
            position: offset,
            colour: color.to_string(),
        });
        Ok(())
    }
}

/// Drawing surface that records calls instead of painting.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Remove and return everything recorded so far.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of completed `stroke` calls.
    pub fn stroke_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Stroke))
    }

    /// Number of completed `fill` calls.
    pub fn fill_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Fill))
    }

    fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn record(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl DrawingSurface for RecordingSurface {
    type Gradient = RecordedGradient;

    fn begin_path(&mut self) {
        self.record(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.record(DrawCommand::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.record(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.record(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.record(DrawCommand::Fill);
    }

    fn set_line_width(&mut self, width: f64) {
        self.record(DrawCommand::SetLineWidth { width });
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.record(DrawCommand::SetStrokeStyle {
            color: color.to_string(),
        });
    }

    fn set_fill_style(&mut self, color: &str) {
        self.record(DrawCommand::SetFillStyle {
            color: color.to_string(),
        });
    }

    fn set_font(&mut self, font: &str) {
        self.record(DrawCommand::SetFont {
            font: font.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.record(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn create_linear_gradient(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> RecordedGradient {
        self.record(DrawCommand::CreateLinearGradient { x0, y0, x1, y1 });
        RecordedGradient {
            x0,
            y0,
            x1,
            y1,
            stops: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_rejects_bad_color() {
        let mut surface = RecordingSurface::new();
        let mut gradient = surface.create_linear_gradient(0.0, 100.0, 0.0, 0.0);
        assert!(gradient.add_color_stop(0.5, "red").is_ok());
        let err = gradient.add_color_stop(0.6, "reddish").unwrap_err();
        assert!(matches!(err, BandsError::InvalidColor(c) if c == "reddish"));
        assert_eq!(gradient.stops.len(), 1);
    }

    #[test]
    fn test_gradient_rejects_out_of_range_offset() {
        let mut surface = RecordingSurface::new();
        let mut gradient = surface.create_linear_gradient(0.0, 100.0, 0.0, 0.0);
        assert!(matches!(
            gradient.add_color_stop(1.5, "red"),
            Err(BandsError::StopOffset(_))
        ));
        assert!(gradient.add_color_stop(f64::NAN, "red").is_err());
    }

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.move_to(1.0, 2.0);
        surface.stroke();
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::BeginPath,
                DrawCommand::MoveTo { x: 1.0, y: 2.0 },
                DrawCommand::Stroke,
            ]
        );
        assert_eq!(surface.stroke_count(), 1);
        assert_eq!(surface.take_commands().len(), 3);
        assert!(surface.is_empty());
    }
}
