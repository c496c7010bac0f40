//! Band background fills.

use crate::geometry::{BandRect, ValueScale};
use crate::types::{Band, ChartArea};

use super::surface::DrawingSurface;

/// Fill the band between `from` and `to` across the full chart width.
///
/// Does nothing when the band declares no background color.
pub fn draw_band_background<S: DrawingSurface>(
    surface: &mut S,
    scale: &dyn ValueScale,
    area: &ChartArea,
    band: &Band,
) {
    let Some(color) = band.background_color.as_deref() else {
        return;
    };

    let rect = BandRect::new(scale, area, band.from, band.to);
    let [first, second, third, fourth] = rect.corners();

    surface.begin_path();
    surface.move_to(first.0, first.1);
    surface.line_to(second.0, second.1);
    surface.line_to(third.0, third.1);
    surface.line_to(fourth.0, fourth.1);
    surface.close_path();
    surface.set_fill_style(color);
    surface.fill();
}
