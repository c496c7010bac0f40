//! Band rule lines and labels.

use crate::geometry::{dash_segments, label_placement, value_to_pixel, LineConstraints, ValueScale};
use crate::types::{BandLineStyle, LineType};

use super::surface::DrawingSurface;

/// Draw a horizontal rule at `y` from `x_start` to `x_end`.
///
/// Dashed rules are tessellated into short segments; each one is its own path.
pub fn draw_rule_line<S: DrawingSurface>(
    surface: &mut S,
    y: f64,
    x_start: f64,
    x_end: f64,
    stroke_width: f64,
    colour: &str,
    line_type: LineType,
) {
    match line_type {
        LineType::Solid => stroke_segment(surface, y, x_start, x_end, stroke_width, colour),
        LineType::Dashed => {
            for (start, stop) in dash_segments(x_start, x_end) {
                stroke_segment(surface, y, start, stop, stroke_width, colour);
            }
        }
    }
}

fn stroke_segment<S: DrawingSurface>(
    surface: &mut S,
    y: f64,
    start: f64,
    stop: f64,
    width: f64,
    colour: &str,
) {
    surface.begin_path();
    surface.move_to(start, y);
    surface.line_to(stop, y);
    surface.set_line_width(width);
    surface.set_stroke_style(colour);
    surface.stroke();
}

/// Draw a band's rule line at `y_value`, plus its label if it has one.
pub fn draw_band_line<S: DrawingSurface>(
    surface: &mut S,
    scale: &dyn ValueScale,
    constraints: &LineConstraints,
    style: &BandLineStyle,
    y_value: f64,
) {
    let y = value_to_pixel(scale, y_value);
    draw_rule_line(
        surface,
        y,
        constraints.start,
        constraints.stop,
        style.stroke,
        &style.colour,
        style.line_type,
    );

    if style.has_label() {
        draw_label(surface, constraints, style);
    }
}

/// Draw the label text above the chart area and underline it.
pub fn draw_label<S: DrawingSurface>(
    surface: &mut S,
    constraints: &LineConstraints,
    style: &BandLineStyle,
) {
    let placement = label_placement(constraints, style.font_size);

    surface.set_font(&style.font_string());
    surface.set_fill_style(&style.colour);
    surface.fill_text(&style.label, placement.x, placement.y);

    draw_rule_line(
        surface,
        placement.underline_y,
        placement.underline_start,
        placement.underline_stop,
        style.stroke,
        &style.colour,
        style.line_type,
    );
}
