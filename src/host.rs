//! The host chart seen by band hooks.
//!
//! `ChartHost` is the read/write view the orchestrator needs: chart type,
//! y-axis scale, chart area and per-dataset color slots. `StaticChart` is
//! an in-memory host for headless rendering, the CLI and tests.

use serde::Deserialize;

use crate::geometry::{LinearScale, ValueScale};
use crate::gradient::Fill;
use crate::render::{CssColor, RecordedGradient};
use crate::types::{ChartArea, ColorProperty};

/// Host chart binding.
pub trait ChartHost {
    /// Gradient type stored in dataset color slots.
    type Gradient;

    /// Configuration name of the chart type, e.g. `"line"`.
    fn chart_type(&self) -> String;
    fn dataset_count(&self) -> usize;
    /// Current color of a dataset, if it is a plain color string.
    fn dataset_color(&self, index: usize, property: ColorProperty) -> Option<CssColor>;
    fn set_dataset_fill(
        &mut self,
        index: usize,
        property: ColorProperty,
        fill: Fill<Self::Gradient>,
    );
    fn y_scale(&self) -> &dyn ValueScale;
    fn chart_area(&self) -> ChartArea;
    /// Canvas height in pixels.
    fn height(&self) -> f64;
}

/// Stroke and fill slots of one in-memory dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticDataset<G> {
    pub border_color: Option<Fill<G>>,
    pub background_color: Option<Fill<G>>,
}

impl<G> Default for StaticDataset<G> {
    fn default() -> Self {
        Self {
            border_color: None,
            background_color: None,
        }
    }
}

impl<G> StaticDataset<G> {
    /// A dataset with flat stroke and fill colors.
    pub fn new(border_color: Option<&str>, background_color: Option<&str>) -> Self {
        Self {
            border_color: border_color.map(|c| Fill::Flat(c.to_string())),
            background_color: background_color.map(|c| Fill::Flat(c.to_string())),
        }
    }

    pub fn slot(&self, property: ColorProperty) -> Option<&Fill<G>> {
        match property {
            ColorProperty::BorderColor => self.border_color.as_ref(),
            ColorProperty::BackgroundColor => self.background_color.as_ref(),
        }
    }

    fn slot_mut(&mut self, property: ColorProperty) -> &mut Option<Fill<G>> {
        match property {
            ColorProperty::BorderColor => &mut self.border_color,
            ColorProperty::BackgroundColor => &mut self.background_color,
        }
    }
}

/// In-memory chart with a linear y-axis.
#[derive(Debug, Clone)]
pub struct StaticChart<G = RecordedGradient> {
    pub chart_type: String,
    pub scale: LinearScale,
    pub area: ChartArea,
    pub height: f64,
    pub datasets: Vec<StaticDataset<G>>,
}

impl<G> StaticChart<G> {
    /// A chart whose y-axis spans `[min, max]` over `area`.
    pub fn new(chart_type: &str, min: f64, max: f64, area: ChartArea, height: f64) -> Self {
        Self {
            chart_type: chart_type.to_string(),
            scale: LinearScale::vertical(min, max, &area),
            area,
            height,
            datasets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: StaticDataset<G>) -> Self {
        self.datasets.push(dataset);
        self
    }
}

impl<G> ChartHost for StaticChart<G> {
    type Gradient = G;

    fn chart_type(&self) -> String {
        self.chart_type.clone()
    }

    fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    fn dataset_color(&self, index: usize, property: ColorProperty) -> Option<CssColor> {
        self.datasets
            .get(index)?
            .slot(property)?
            .flat_color()
            .map(str::to_string)
    }

    fn set_dataset_fill(&mut self, index: usize, property: ColorProperty, fill: Fill<G>) {
        if let Some(dataset) = self.datasets.get_mut(index) {
            *dataset.slot_mut(property) = Some(fill);
        }
    }

    fn y_scale(&self) -> &dyn ValueScale {
        &self.scale
    }

    fn chart_area(&self) -> ChartArea {
        self.area
    }

    fn height(&self) -> f64 {
        self.height
    }
}

/// JSON description of a [`StaticChart`].
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StaticChartConfig {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub height: f64,
    pub area: ChartArea,
    pub y_axis: AxisRange,
    #[serde(default)]
    pub datasets: Vec<DatasetColors>,
}

/// Value range of the y-axis.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Declared colors of one dataset.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatasetColors {
    pub border_color: Option<String>,
    pub background_color: Option<String>,
}

impl StaticChartConfig {
    pub fn into_chart<G>(self) -> StaticChart<G> {
        let mut chart = StaticChart::new(
            &self.chart_type,
            self.y_axis.min,
            self.y_axis.max,
            self.area,
            self.height,
        );
        chart.datasets = self
            .datasets
            .iter()
            .map(|d| StaticDataset::new(d.border_color.as_deref(), d.background_color.as_deref()))
            .collect();
        chart
    }
}
