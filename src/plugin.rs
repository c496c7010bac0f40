//! Per-chart band orchestrator.
//!
//! `BandsPlugin` wires band gradients, backgrounds and rule lines into the
//! host chart lifecycle:
//! - `on_init`: check the chart type and snapshot each dataset's base color
//! - `on_scale_update`: rebuild every dataset's gradient
//! - `on_draw`: paint backgrounds and rule lines, last-declared band first
//!
//! All state lives on the instance, so charts never share support state or
//! base colors. Hooks never fail; problems are recorded as warnings.

use crate::diagnostics::Diagnostics;
use crate::error::BandsError;
use crate::geometry::LineConstraints;
use crate::gradient::GradientStopBuilder;
use crate::host::ChartHost;
use crate::render::{
    draw_band_background, draw_band_line, CssColor, DrawingSurface, CHART_DEFAULT_COLOR,
};
use crate::types::{BandsConfig, ChartType, ColorProperty};

/// Lifecycle state of a [`BandsPlugin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluginState {
    /// `on_init` has not run yet; hooks are no-ops.
    #[default]
    Uninitialized,
    /// Supported chart; gradients target `property`.
    Active { property: ColorProperty },
    /// Unsupported chart type; every later hook is a no-op.
    Unsupported,
}

/// Band overlay for one chart instance.
#[derive(Debug, Default)]
pub struct BandsPlugin {
    config: BandsConfig,
    state: PluginState,
    base_colors: Vec<CssColor>,
    diagnostics: Diagnostics,
}

impl BandsPlugin {
    pub fn new(config: BandsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BandsConfig {
        &self.config
    }

    /// Bands are re-read on every pass, so edits apply from the next hook.
    pub fn config_mut(&mut self) -> &mut BandsConfig {
        &mut self.config
    }

    pub fn state(&self) -> PluginState {
        self.state
    }

    /// Dataset colors captured by the last `on_init`.
    pub fn base_colors(&self) -> &[CssColor] {
        &self.base_colors
    }

    pub fn warnings(&self) -> &[BandsError] {
        self.diagnostics.warnings()
    }

    /// Remove and return every warning raised so far.
    pub fn take_warnings(&mut self) -> Vec<BandsError> {
        self.diagnostics.take()
    }

    /// Record a failure raised outside the hooks, e.g. by a host binding.
    pub fn report(&mut self, error: BandsError) {
        self.diagnostics.warn(error);
    }

    /// Check chart support and snapshot dataset base colors.
    pub fn on_init<H: ChartHost>(&mut self, host: &H) {
        self.base_colors.clear();

        let chart_type = host.chart_type();
        let Some(supported) = ChartType::from_name(&chart_type) else {
            self.state = PluginState::Unsupported;
            self.diagnostics
                .warn(BandsError::UnsupportedChartType(chart_type));
            return;
        };

        let property = supported.color_property();
        self.base_colors = (0..host.dataset_count())
            .map(|i| {
                host.dataset_color(i, property)
                    .unwrap_or_else(|| CHART_DEFAULT_COLOR.to_string())
            })
            .collect();
        self.state = PluginState::Active { property };

        tracing::debug!(
            target: "chartbands",
            %chart_type,
            datasets = self.base_colors.len(),
            "bands initialized"
        );
    }

    /// Rebuild each dataset's gradient and write it to the dataset.
    pub fn on_scale_update<H, S>(&mut self, host: &mut H, surface: &mut S)
    where
        H: ChartHost<Gradient = S::Gradient>,
        S: DrawingSurface,
    {
        let PluginState::Active { property } = self.state else {
            return;
        };

        let bands = self.config.resolved_bands();
        for dataset in 0..host.dataset_count() {
            let base_color = self
                .base_colors
                .get(dataset)
                .map_or(CHART_DEFAULT_COLOR, String::as_str);

            let builder =
                GradientStopBuilder::new(host.y_scale(), host.height(), self.config.mode);
            let fill = builder.fill(surface, &bands, base_color, dataset, &mut self.diagnostics);
            host.set_dataset_fill(dataset, property, fill);
        }
    }

    /// Paint band backgrounds and rule lines, last-declared band first.
    pub fn on_draw<H, S>(&mut self, host: &H, surface: &mut S)
    where
        H: ChartHost,
        S: DrawingSurface,
    {
        if !matches!(self.state, PluginState::Active { .. }) {
            return;
        }

        let scale = host.y_scale();
        let area = host.chart_area();
        let constraints = LineConstraints::from_area(&area);
        let draws_backgrounds = self.config.mode.draws_backgrounds();

        for (index, band) in self.config.resolved_bands().iter().enumerate().rev() {
            if draws_backgrounds {
                draw_band_background(surface, scale, &area, band);
            }

            match band.y_value.value() {
                Some(y_value) => {
                    draw_band_line(surface, scale, &constraints, &band.band_line, y_value);
                }
                None => self
                    .diagnostics
                    .warn(BandsError::MissingYValue { band: index }),
            }
        }
    }
}
