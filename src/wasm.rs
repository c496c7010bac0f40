//! Chart.js binding.
//!
//! Exposes `ChartBands` to JavaScript. Each hook takes the Chart.js 2 chart
//! instance, reads it through `js_sys::Reflect` and forwards to that chart's
//! own [`BandsPlugin`]. One `ChartBands` can be registered globally: charts
//! are told apart by object identity and never share support state or base
//! colors. Nothing here throws: a chart that cannot be read is reported as a
//! warning and the hook does nothing.
//!
//! ```javascript
//! import init, { ChartBands } from 'chartbands';
//! await init();
//! const bands = new ChartBands({ mode: 'backgrounds' });
//! Chart.pluginService.register({
//!   beforeInit: (chart) => bands.beforeInit(chart),
//!   afterScaleUpdate: (chart) => bands.afterScaleUpdate(chart),
//!   beforeDraw: (chart) => bands.beforeDraw(chart),
//!   destroy: (chart) => bands.destroy(chart),
//! });
//! ```

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::error::{BandsError, Result};
use crate::geometry::ValueScale;
use crate::gradient::Fill;
use crate::host::ChartHost;
use crate::plugin::{BandsPlugin, PluginState};
use crate::render::{CanvasSurface, CssColor};
use crate::types::{BandConfig, BandsConfig, ChartArea, ColorProperty};

/// Chart.js id of the default value axis.
const Y_AXIS_ID: &str = "y-axis-0";

fn get(target: &JsValue, key: &str) -> Result<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .map_err(|_| BandsError::Host(format!("cannot read `{key}`")))
}

fn get_f64(target: &JsValue, key: &str) -> Result<f64> {
    get(target, key)?
        .as_f64()
        .ok_or_else(|| BandsError::Host(format!("`{key}` is not a number")))
}

/// A Chart.js scale; calls `getPixelForValue`.
struct JsScale {
    scale: JsValue,
    get_pixel: Function,
}

impl ValueScale for JsScale {
    fn pixel_for_value(&self, value: f64) -> f64 {
        self.get_pixel
            .call1(&self.scale, &JsValue::from_f64(value))
            .ok()
            .and_then(|pixel| pixel.as_f64())
            .unwrap_or(f64::NAN)
    }
}

fn missing_scale(_value: f64) -> f64 {
    f64::NAN
}

/// A Chart.js 2 chart instance.
///
/// Scales do not exist yet when `beforeInit` runs, so the y-axis is optional.
struct JsChart {
    chart: JsValue,
    datasets: Array,
    scale: Option<JsScale>,
}

impl JsChart {
    fn new(chart: JsValue) -> Result<Self> {
        let data = get(&get(&chart, "config")?, "data")?;
        let datasets = get(&data, "datasets")?
            .dyn_into::<Array>()
            .map_err(|_| "`config.data.datasets` is not an array")?;

        let scale = get(&chart, "scales")
            .and_then(|scales| get(&scales, Y_AXIS_ID))
            .ok()
            .and_then(|scale| {
                let get_pixel = get(&scale, "getPixelForValue")
                    .ok()?
                    .dyn_into::<Function>()
                    .ok()?;
                Some(JsScale { scale, get_pixel })
            });

        Ok(Self {
            chart,
            datasets,
            scale,
        })
    }

    fn require_scale(&self) -> Result<()> {
        match self.scale {
            Some(_) => Ok(()),
            None => Err(BandsError::Host(format!(
                "scale `{Y_AXIS_ID}` has no getPixelForValue"
            ))),
        }
    }

    /// The inner `chart.chart` object in Chart.js 2, or the instance itself.
    fn inner(&self) -> JsValue {
        get(&self.chart, "chart")
            .ok()
            .filter(JsValue::is_object)
            .unwrap_or_else(|| self.chart.clone())
    }

    fn surface(&self) -> Result<CanvasSurface> {
        self.require_scale()?;
        let ctx = get(&self.inner(), "ctx")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "chart has no 2d context")?;
        Ok(CanvasSurface::new(ctx))
    }

    /// `options.bands`, when the chart declares its bands itself.
    ///
    /// # Errors
    /// Returns an error if `options.bands` is an array of malformed bands.
    fn declared_bands(&self) -> Result<Option<Vec<BandConfig>>> {
        let Ok(options) = get(&self.chart, "options") else {
            return Ok(None);
        };
        let Ok(bands) = get(&options, "bands") else {
            return Ok(None);
        };
        if !Array::is_array(&bands) {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(bands)
            .map(Some)
            .map_err(|e| BandsError::Host(format!("invalid `options.bands`: {e}")))
    }
}

impl ChartHost for JsChart {
    type Gradient = CanvasGradient;

    fn chart_type(&self) -> String {
        get(&self.chart, "config")
            .and_then(|config| get(&config, "type"))
            .ok()
            .and_then(|t| t.as_string())
            .unwrap_or_default()
    }

    fn dataset_count(&self) -> usize {
        self.datasets.length() as usize
    }

    #[allow(clippy::cast_possible_truncation)]
    fn dataset_color(&self, index: usize, property: ColorProperty) -> Option<CssColor> {
        get(&self.datasets.get(index as u32), property.key())
            .ok()?
            .as_string()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set_dataset_fill(
        &mut self,
        index: usize,
        property: ColorProperty,
        fill: Fill<CanvasGradient>,
    ) {
        let value: JsValue = match fill {
            Fill::Gradient(gradient) => gradient.into(),
            Fill::Flat(color) => JsValue::from_str(&color),
        };
        let dataset = self.datasets.get(index as u32);
        let _ = Reflect::set(&dataset, &JsValue::from_str(property.key()), &value);
    }

    fn y_scale(&self) -> &dyn ValueScale {
        match &self.scale {
            Some(scale) => scale as &dyn ValueScale,
            None => &missing_scale,
        }
    }

    fn chart_area(&self) -> ChartArea {
        let Ok(area) = get(&self.chart, "chartArea") else {
            return ChartArea::default();
        };
        ChartArea {
            top: get_f64(&area, "top").unwrap_or(0.0),
            left: get_f64(&area, "left").unwrap_or(0.0),
            right: get_f64(&area, "right").unwrap_or(0.0),
            bottom: get_f64(&area, "bottom").unwrap_or(0.0),
        }
    }

    fn height(&self) -> f64 {
        get_f64(&self.inner(), "height").unwrap_or(f64::NAN)
    }
}

/// Band state of one chart, keyed by the chart object itself.
struct ChartEntry {
    chart: JsValue,
    plugin: BandsPlugin,
}

impl ChartEntry {
    fn is(&self, chart: &JsValue) -> bool {
        Object::is(&self.chart, chart)
    }
}

/// Band overlay for Chart.js charts.
#[wasm_bindgen]
pub struct ChartBands {
    config: BandsConfig,
    charts: Vec<ChartEntry>,
}

impl ChartBands {
    /// The plugin for `chart`, created from the shared options on first use.
    fn plugin_for(&mut self, chart: &JsValue) -> Option<&mut BandsPlugin> {
        let index = match self.charts.iter().position(|entry| entry.is(chart)) {
            Some(index) => index,
            None => {
                self.charts.push(ChartEntry {
                    chart: chart.clone(),
                    plugin: BandsPlugin::new(self.config.clone()),
                });
                self.charts.len() - 1
            }
        };
        self.charts.get_mut(index).map(|entry| &mut entry.plugin)
    }

    /// Read the chart, picking up `options.bands` if it declares any.
    fn bind(&mut self, chart: JsValue) -> Option<(JsChart, &mut BandsPlugin)> {
        let plugin = self.plugin_for(&chart)?;
        let host = match JsChart::new(chart) {
            Ok(host) => host,
            Err(error) => {
                plugin.report(error);
                return None;
            }
        };
        match host.declared_bands() {
            Ok(Some(bands)) => plugin.config_mut().bands = bands,
            Ok(None) => {}
            Err(error) => plugin.report(error),
        }
        Some((host, plugin))
    }
}

#[wasm_bindgen]
impl ChartBands {
    /// Create the overlay from an options object (`{ mode, bands, defaults }`).
    ///
    /// # Errors
    /// Returns an error if the options have the wrong shape.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> std::result::Result<ChartBands, JsValue> {
        console_error_panic_hook::set_once();

        let config = if options.is_undefined() || options.is_null() {
            BandsConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Invalid band options: {e}")))?
        };

        Ok(ChartBands {
            config,
            charts: Vec::new(),
        })
    }

    #[wasm_bindgen(js_name = beforeInit)]
    pub fn before_init(&mut self, chart: JsValue) {
        if let Some((host, plugin)) = self.bind(chart) {
            plugin.on_init(&host);
        }
    }

    #[wasm_bindgen(js_name = afterScaleUpdate)]
    pub fn after_scale_update(&mut self, chart: JsValue) {
        let Some((mut host, plugin)) = self.bind(chart) else {
            return;
        };
        if !matches!(plugin.state(), PluginState::Active { .. }) {
            return;
        }
        match host.surface() {
            Ok(mut surface) => plugin.on_scale_update(&mut host, &mut surface),
            Err(error) => plugin.report(error),
        }
    }

    #[wasm_bindgen(js_name = beforeDraw)]
    pub fn before_draw(&mut self, chart: JsValue) {
        let Some((host, plugin)) = self.bind(chart) else {
            return;
        };
        if !matches!(plugin.state(), PluginState::Active { .. }) {
            return;
        }
        match host.surface() {
            Ok(mut surface) => plugin.on_draw(&host, &mut surface),
            Err(error) => plugin.report(error),
        }
    }

    /// Forget a chart's band state once Chart.js destroys it.
    pub fn destroy(&mut self, chart: &JsValue) {
        self.charts.retain(|entry| !entry.is(chart));
    }

    /// Whether `chart` has not been found to be of an unsupported type.
    #[wasm_bindgen(js_name = isSupported)]
    pub fn is_supported(&self, chart: &JsValue) -> bool {
        !self
            .charts
            .iter()
            .any(|entry| entry.is(chart) && entry.plugin.state() == PluginState::Unsupported)
    }

    /// Number of charts currently tracked.
    #[wasm_bindgen(js_name = chartCount)]
    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// Drain warnings raised since the last call, across every chart.
    #[wasm_bindgen(js_name = takeWarnings)]
    pub fn take_warnings(&mut self) -> Vec<String> {
        self.charts
            .iter_mut()
            .flat_map(|entry| entry.plugin.take_warnings())
            .map(|warning| warning.to_string())
            .collect()
    }
}
