//! Band gradients for dataset strokes and fills.
//!
//! Each band contributes two stops at the fractions of its `from` and `to`
//! pixels. A final stop at 1.0 in the dataset's base color anchors the part
//! of the stroke no band covers. The result is either a fully built
//! gradient or the flat base color, never a gradient with some stops missing.

use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::error::{BandsError, Result};
use crate::geometry::{gradient_fraction, value_to_pixel, ValueScale};
use crate::render::{CssColor, DrawingSurface, LinearGradient};
use crate::types::{Band, BandsMode};

/// One color stop of a band gradient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub position: f64,
    pub colour: CssColor,
}

/// What gets written to a dataset's color property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Fill<G> {
    Gradient(G),
    Flat(CssColor),
}

impl<G> Fill<G> {
    pub fn is_flat(&self) -> bool {
        matches!(self, Self::Flat(_))
    }

    pub fn gradient(&self) -> Option<&G> {
        match self {
            Self::Gradient(g) => Some(g),
            Self::Flat(_) => None,
        }
    }

    pub fn flat_color(&self) -> Option<&str> {
        match self {
            Self::Gradient(_) => None,
            Self::Flat(color) => Some(color),
        }
    }
}

/// Builds band gradients against one value scale and chart height.
pub struct GradientStopBuilder<'a> {
    scale: &'a dyn ValueScale,
    height: f64,
    mode: BandsMode,
}

impl<'a> GradientStopBuilder<'a> {
    pub fn new(scale: &'a dyn ValueScale, height: f64, mode: BandsMode) -> Self {
        Self {
            scale,
            height,
            mode,
        }
    }

    /// Compute the ordered stops for `dataset`, ending with `(1.0, base_color)`.
    ///
    /// # Errors
    /// Returns `InvalidColorDescriptor` for the first band whose color has the
    /// wrong shape for the mode.
    pub fn stops(
        &self,
        bands: &[Band],
        base_color: &str,
        dataset: usize,
    ) -> Result<Vec<GradientStop>> {
        let mut stops = Vec::with_capacity(bands.len() * 2 + 1);

        for (index, band) in bands.iter().enumerate() {
            let color = band
                .color
                .resolve(self.mode, dataset)
                .ok_or(BandsError::InvalidColorDescriptor {
                    band: index,
                    dataset,
                })?;

            let from_y = value_to_pixel(self.scale, band.from);
            let to_y = value_to_pixel(self.scale, band.to);

            stops.push(GradientStop {
                position: gradient_fraction(from_y, self.height),
                colour: color.to_string(),
            });
            stops.push(GradientStop {
                position: gradient_fraction(to_y, self.height),
                colour: color.to_string(),
            });
        }

        stops.push(GradientStop {
            position: 1.0,
            colour: base_color.to_string(),
        });
        Ok(stops)
    }

    /// Build the dataset's fill, falling back to `base_color` on any failure.
    pub fn fill<S: DrawingSurface>(
        &self,
        surface: &mut S,
        bands: &[Band],
        base_color: &str,
        dataset: usize,
        diagnostics: &mut Diagnostics,
    ) -> Fill<S::Gradient> {
        let result = self
            .stops(bands, base_color, dataset)
            .and_then(|stops| build_gradient(surface, &stops, self.height));

        match result {
            Ok(gradient) => Fill::Gradient(gradient),
            Err(error) => {
                diagnostics.warn(error);
                Fill::Flat(base_color.to_string())
            }
        }
    }
}

/// Create a bottom-to-top gradient over `height` and add every stop in order.
///
/// # Errors
/// Returns `GradientConstruction` if the height is unusable or the surface
/// rejects any stop. The half-built gradient is dropped.
pub fn build_gradient<S: DrawingSurface>(
    surface: &mut S,
    stops: &[GradientStop],
    height: f64,
) -> Result<S::Gradient> {
    if !(height.is_finite() && height > 0.0) {
        return Err(BandsError::GradientConstruction(format!(
            "chart height {height} must be positive"
        )));
    }

    let mut gradient = surface.create_linear_gradient(0.0, height, 0.0, 0.0);
    for stop in stops {
        gradient
            .add_color_stop(stop.position, &stop.colour)
            .map_err(|e| BandsError::GradientConstruction(e.to_string()))?;
    }
    Ok(gradient)
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
    use crate::render::RecordingSurface;
    use crate::types::ColorSpec;

    fn shared_band(from: f64, to: f64, color: &str) -> Band {
        Band {
            from,
            to,
            color: ColorSpec::Shared(color.to_string()),
            ..Band::default()
        }
    }

    fn scale(v: f64) -> f64 {
        100.0 - v * 2.0
    }

    #[test]
    fn test_zero_bands_yield_terminal_stop() {
        let builder = GradientStopBuilder::new(&scale, 100.0, BandsMode::Backgrounds);
        let stops = builder.stops(&[], "blue", 0).unwrap();
        assert_eq!(
            stops,
            vec![GradientStop {
                position: 1.0,
                colour: "blue".to_string()
            }]
        );
    }

    #[test]
    fn test_two_stops_per_band_in_order() {
        let builder = GradientStopBuilder::new(&scale, 100.0, BandsMode::Backgrounds);
        let bands = [shared_band(0.0, 10.0, "green"), shared_band(10.0, 25.0, "red")];
        let stops = builder.stops(&bands, "blue", 0).unwrap();
        let expected = [0.0, 0.2, 0.2, 0.5, 1.0];
        assert_eq!(stops.len(), expected.len());
        for (stop, want) in stops.iter().zip(expected) {
            assert!((stop.position - want).abs() < 1e-9, "{stop:?} != {want}");
        }
        assert_eq!(stops[3].colour, "red");
        assert_eq!(stops[4].colour, "blue");
    }

    #[test]
    fn test_sequence_color_rejected_in_shared_mode() {
        let builder = GradientStopBuilder::new(&scale, 100.0, BandsMode::Lines);
        let bands = [Band::default()];
        let err = builder.stops(&bands, "blue", 0).unwrap_err();
        assert!(matches!(
            err,
            BandsError::InvalidColorDescriptor { band: 0, dataset: 0 }
        ));
    }

    #[test]
    fn test_degenerate_height_falls_back() {
        let builder = GradientStopBuilder::new(&scale, 0.0, BandsMode::Backgrounds);
        let mut surface = RecordingSurface::new();
        let mut diagnostics = Diagnostics::new();
        let fill = builder.fill(&mut surface, &[], "blue", 0, &mut diagnostics);
        assert_eq!(fill.flat_color(), Some("blue"));
        assert!(matches!(
            diagnostics.warnings()[0],
            BandsError::GradientConstruction(_)
        ));
    }
}
