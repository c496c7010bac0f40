//! Value-axis geometry for bands.
//!
//! These helpers keep band math testable without depending on Canvas APIs:
//! value to pixel mapping, the pixel to gradient-fraction flip, dash
//! tessellation and label placement.

use crate::types::ChartArea;

/// Distance between the starts of two consecutive dashes.
pub const DASH_STEP: f64 = 6.0;
/// Length of one dash.
pub const DASH_LENGTH: f64 = 4.0;
/// Horizontal inset of a label underline from the canvas edge and the label.
pub const LABEL_UNDERLINE_INSET: f64 = 10.0;

/// Maps values on the bounded axis to pixel coordinates.
pub trait ValueScale {
    fn pixel_for_value(&self, value: f64) -> f64;
}

impl<F> ValueScale for F
where
    F: Fn(f64) -> f64,
{
    fn pixel_for_value(&self, value: f64) -> f64 {
        self(value)
    }
}

/// Convert a value to a pixel position.
///
/// `NaN` and out-of-range values are passed through unchanged.
pub fn value_to_pixel(scale: &dyn ValueScale, value: f64) -> f64 {
    scale.pixel_for_value(value)
}

/// Convert a pixel position to a gradient fraction.
///
/// The gradient runs from the chart bottom (0.0) to the top (1.0) while
/// pixel coordinates grow downwards.
pub fn gradient_fraction(pixel: f64, height: f64) -> f64 {
    1.0 - pixel / height
}

/// Linear value axis mapping `[min, max]` onto `[start_pixel, end_pixel]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub min: f64,
    pub max: f64,
    /// Pixel for `min`
    pub start_pixel: f64,
    /// Pixel for `max`
    pub end_pixel: f64,
}

impl LinearScale {
    /// A vertical axis over `area`: `min` at the bottom, `max` at the top.
    pub fn vertical(min: f64, max: f64, area: &ChartArea) -> Self {
        Self {
            min,
            max,
            start_pixel: area.bottom,
            end_pixel: area.top,
        }
    }
}

impl ValueScale for LinearScale {
    fn pixel_for_value(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return self.start_pixel;
        }
        let t = (value - self.min) / range;
        t.mul_add(self.end_pixel - self.start_pixel, self.start_pixel)
    }
}

/// Horizontal span and label anchor for a rule line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineConstraints {
    pub top: f64,
    pub start: f64,
    pub stop: f64,
}

impl LineConstraints {
    pub fn from_area(area: &ChartArea) -> Self {
        Self {
            top: area.top,
            start: area.left,
            stop: area.right,
        }
    }
}

/// Dash segments `(x, x + DASH_LENGTH)` from `start` while `x < stop`.
///
/// The last dash may run past `stop`; clipping is left to the canvas.
/// Dashes are placed by index; the count is fixed when the span is tessellated.
#[derive(Debug, Clone)]
pub struct DashSegments {
    start: f64,
    index: f64,
    count: f64,
}

impl Iterator for DashSegments {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let x = self.index.mul_add(DASH_STEP, self.start);
        self.index += 1.0;
        Some((x, x + DASH_LENGTH))
    }
}

/// Tessellate `[start, stop]` into dashes.
///
/// Non-finite bounds produce no dashes.
pub fn dash_segments(start: f64, stop: f64) -> DashSegments {
    let count = if start.is_finite() && stop.is_finite() && stop > start {
        ((stop - start) / DASH_STEP).ceil()
    } else {
        0.0
    };
    DashSegments {
        start,
        index: 0.0,
        count,
    }
}

/// Where a band label and its underline are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub x: f64,
    pub y: f64,
    pub underline_start: f64,
    pub underline_stop: f64,
    pub underline_y: f64,
}

/// Place a label above the chart area, two font heights over `top`.
pub fn label_placement(constraints: &LineConstraints, font_size: f64) -> LabelPlacement {
    let x = constraints.start;
    let y = constraints.top - font_size * 2.0;
    LabelPlacement {
        x,
        y,
        underline_start: LABEL_UNDERLINE_INSET,
        underline_stop: x - LABEL_UNDERLINE_INSET,
        underline_y: font_size.mul_add(0.5, y),
    }
}

/// Pixel rectangle of a band background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandRect {
    pub left: f64,
    pub right: f64,
    pub from_y: f64,
    pub to_y: f64,
}

impl BandRect {
    /// Span the full chart width between the pixels of `from` and `to`.
    pub fn new(scale: &dyn ValueScale, area: &ChartArea, from: f64, to: f64) -> Self {
        Self {
            left: area.left,
            right: area.right,
            from_y: value_to_pixel(scale, from),
            to_y: value_to_pixel(scale, to),
        }
    }

    /// Corners in path order.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.left, self.from_y),
            (self.left, self.to_y),
            (self.right, self.to_y),
            (self.right, self.from_y),
        ]
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

    fn area() -> ChartArea {
        ChartArea {
            top: 0.0,
            left: 0.0,
            right: 200.0,
            bottom: 100.0,
        }
    }

    #[test]
    fn test_linear_scale_is_flipped() {
        let scale = LinearScale::vertical(0.0, 50.0, &area());
        assert_eq!(scale.pixel_for_value(0.0), 100.0);
        assert_eq!(scale.pixel_for_value(50.0), 0.0);
        assert_eq!(scale.pixel_for_value(10.0), 80.0);
    }

    #[test]
    fn test_linear_scale_degenerate_range() {
        let scale = LinearScale::vertical(3.0, 3.0, &area());
        assert_eq!(scale.pixel_for_value(3.0), 100.0);
    }

    #[test]
    fn test_nan_passes_through() {
        let scale = LinearScale::vertical(0.0, 50.0, &area());
        assert!(value_to_pixel(&scale, f64::NAN).is_nan());
    }

    #[test]
    fn test_closure_scale() {
        let scale = |v: f64| 100.0 - v * 2.0;
        assert_eq!(value_to_pixel(&scale, 10.0), 80.0);
    }

    #[test]
    fn test_fraction_increases_with_value() {
        let scale = LinearScale::vertical(0.0, 50.0, &area());
        let low = gradient_fraction(scale.pixel_for_value(5.0), 100.0);
        let high = gradient_fraction(scale.pixel_for_value(25.0), 100.0);
        assert!(high > low);
    }

    #[test]
    fn test_dashes_over_hundred_pixels() {
        let dashes: Vec<_> = dash_segments(0.0, 100.0).collect();
        assert_eq!(dashes.len(), 17);
        assert_eq!(dashes[0], (0.0, 4.0));
        assert_eq!(dashes[1], (6.0, 10.0));
        assert_eq!(dashes[16], (96.0, 100.0));
        assert!(dashes.iter().all(|&(_, end)| end <= 100.0));
    }

    #[test]
    fn test_dashes_empty_or_unbounded_span() {
        assert_eq!(dash_segments(50.0, 50.0).count(), 0);
        assert_eq!(dash_segments(60.0, 50.0).count(), 0);
        assert_eq!(dash_segments(0.0, f64::INFINITY).count(), 0);
        assert_eq!(dash_segments(f64::NAN, 10.0).count(), 0);
    }

    #[test]
    fn test_dashes_terminate_at_huge_coordinates() {
        let dashes: Vec<_> = dash_segments(1e17, 1e17 + 100.0).collect();
        assert!(!dashes.is_empty());
        assert!(dashes.len() <= 17);
    }

    #[test]
    fn test_label_placement() {
        let constraints = LineConstraints {
            top: 40.0,
            start: 50.0,
            stop: 300.0,
        };
        let placement = label_placement(&constraints, 12.0);
        assert_eq!(placement.x, 50.0);
        assert_eq!(placement.y, 16.0);
        assert_eq!(placement.underline_start, 10.0);
        assert_eq!(placement.underline_stop, 40.0);
        assert_eq!(placement.underline_y, 22.0);
    }

    #[test]
    fn test_band_rect_corners() {
        let scale = LinearScale::vertical(0.0, 50.0, &area());
        let rect = BandRect::new(&scale, &area(), 0.0, 10.0);
        assert_eq!(
            rect.corners(),
            [(0.0, 100.0), (0.0, 80.0), (200.0, 80.0), (200.0, 100.0)]
        );
    }
}
