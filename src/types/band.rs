use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Default band color (one entry, shared by every dataset).
pub const DEFAULT_BAND_COLOR: &str = "rgba(0, 255, 0, 1.000)";
/// Default rule line and label color.
pub const DEFAULT_LINE_COLOUR: &str = "rgba(0, 0, 0, 1.000)";
/// Default rule line width in pixels.
pub const DEFAULT_LINE_STROKE: f64 = 0.01;
/// Default label font size in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
/// Default label font family.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica Neue, Helvetica, Arial, sans-serif";
/// Default label font style.
pub const DEFAULT_FONT_STYLE: &str = "normal";

/// Which of the band features are active for a chart.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum BandsMode {
    /// Gradients, rule lines and labels
    Lines,
    /// Lines plus filled band backgrounds
    #[default]
    Backgrounds,
    /// Backgrounds plus one band color per dataset
    Palette,
}

impl BandsMode {
    pub const fn draws_backgrounds(self) -> bool {
        matches!(self, Self::Backgrounds | Self::Palette)
    }

    pub const fn per_dataset_colors(self) -> bool {
        matches!(self, Self::Palette)
    }
}

/// Rule line style.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum LineType {
    #[default]
    Solid,
    Dashed,
}

impl From<String> for LineType {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("dashed") {
            Self::Dashed
        } else {
            Self::Solid
        }
    }
}

/// The `color` field of a band: one shared color or one color per dataset.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
    Shared(String),
    PerDataset(Vec<String>),
    /// Anything else; never resolves to a color.
    Unusable(serde_json::Value),
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::PerDataset(vec![DEFAULT_BAND_COLOR.to_string()])
    }
}

impl ColorSpec {
    /// Resolve the color a band paints for `dataset`.
    ///
    /// Shared mode only accepts a non-empty string. Palette mode accepts a
    /// non-empty sequence (indexed modulo its length) or a string.
    pub fn resolve(&self, mode: BandsMode, dataset: usize) -> Option<&str> {
        let color = match self {
            Self::Shared(color) => Some(color.as_str()),
            Self::PerDataset(colors) if mode.per_dataset_colors() && !colors.is_empty() => {
                colors.get(dataset % colors.len()).map(String::as_str)
            }
            Self::PerDataset(_) | Self::Unusable(_) => None,
        };
        color.filter(|c| !c.trim().is_empty())
    }
}

/// Position of a band's rule line on the value axis.
///
/// Any non-numeric value (the conventional `false`, a string, `null`)
/// means the band has no line.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum YValue {
    Value(f64),
    #[default]
    Unset,
}

impl YValue {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset => None,
        }
    }
}

impl From<serde_json::Value> for YValue {
    fn from(value: serde_json::Value) -> Self {
        value.as_f64().map_or(Self::Unset, Self::Value)
    }
}

impl From<YValue> for serde_json::Value {
    fn from(value: YValue) -> Self {
        match value {
            YValue::Value(v) => serde_json::Value::from(v),
            YValue::Unset => serde_json::Value::Bool(false),
        }
    }
}

/// Accept `12` or `"12"` for numeric style fields.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Declared rule line options; unset fields come from the defaults.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BandLineConfig {
    #[serde(default, deserialize_with = "lenient_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub line_type: Option<LineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
}

impl BandLineConfig {
    /// Merge declared fields over `defaults`, field by field.
    pub fn resolve(&self, defaults: &BandLineStyle) -> BandLineStyle {
        BandLineStyle {
            stroke: self.stroke.unwrap_or(defaults.stroke),
            colour: self
                .colour
                .clone()
                .unwrap_or_else(|| defaults.colour.clone()),
            line_type: self.line_type.unwrap_or(defaults.line_type),
            label: self.label.clone().unwrap_or_else(|| defaults.label.clone()),
            font_size: self.font_size.unwrap_or(defaults.font_size),
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| defaults.font_family.clone()),
            font_style: self
                .font_style
                .clone()
                .unwrap_or_else(|| defaults.font_style.clone()),
        }
    }
}

/// Fully resolved rule line style for one draw call.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BandLineStyle {
    pub stroke: f64,
    pub colour: String,
    #[serde(rename = "type")]
    pub line_type: LineType,
    pub label: String,
    pub font_size: f64,
    pub font_family: String,
    pub font_style: String,
}

impl Default for BandLineStyle {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_LINE_STROKE,
            colour: DEFAULT_LINE_COLOUR.to_string(),
            line_type: LineType::Solid,
            label: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_style: DEFAULT_FONT_STYLE.to_string(),
        }
    }
}

impl BandLineStyle {
    /// CSS font shorthand, e.g. `"normal 12px Helvetica"`.
    pub fn font_string(&self) -> String {
        format!("{} {}px {}", self.font_style, self.font_size, self.font_family)
    }

    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}

/// A band as declared in chart configuration.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BandConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_value: Option<YValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_line: Option<BandLineConfig>,
}

impl BandConfig {
    /// Merge declared fields over `defaults`.
    ///
    /// Top-level fields take the declared value when present. `bandLine`
    /// is merged one level deeper so a band can override just its label.
    pub fn resolve(&self, defaults: &Band) -> Band {
        Band {
            from: self.from.unwrap_or(defaults.from),
            to: self.to.unwrap_or(defaults.to),
            y_value: self.y_value.unwrap_or(defaults.y_value),
            color: self.color.clone().unwrap_or_else(|| defaults.color.clone()),
            background_color: self
                .background_color
                .clone()
                .or_else(|| defaults.background_color.clone()),
            band_line: self
                .band_line
                .as_ref()
                .map_or_else(
                    || defaults.band_line.clone(),
                    |line| line.resolve(&defaults.band_line),
                ),
        }
    }
}

/// A band with every option resolved.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub from: f64,
    pub to: f64,
    pub y_value: YValue,
    pub color: ColorSpec,
    pub background_color: Option<String>,
    pub band_line: BandLineStyle,
}

impl Default for Band {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            y_value: YValue::Unset,
            color: ColorSpec::default(),
            background_color: None,
            band_line: BandLineStyle::default(),
        }
    }
}

/// Band options for one chart.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BandsConfig {
    #[serde(default)]
    pub mode: BandsMode,
    #[serde(default)]
    pub bands: Vec<BandConfig>,
    /// Chart-wide overrides applied before each band's own fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<BandConfig>,
}

impl BandsConfig {
    /// Parse band options from JSON.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Built-in defaults with the chart-wide overrides merged in.
    pub fn band_defaults(&self) -> Band {
        let builtin = Band::default();
        match &self.defaults {
            Some(overrides) => overrides.resolve(&builtin),
            None => builtin,
        }
    }

    /// Resolve every declared band, in declaration order.
    pub fn resolved_bands(&self) -> Vec<Band> {
        let defaults = self.band_defaults();
        self.bands.iter().map(|b| b.resolve(&defaults)).collect()
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
    fn test_empty_band_takes_all_defaults() {
        let band = BandConfig::default().resolve(&Band::default());
        assert_eq!(band, Band::default());
        assert_eq!(band.y_value, YValue::Unset);
        assert_eq!(band.band_line.font_size, 12.0);
    }

    #[test]
    fn test_declared_fields_win() {
        let config = BandConfig {
            from: Some(5.0),
            color: Some(ColorSpec::Shared("red".to_string())),
            band_line: Some(BandLineConfig {
                label: Some("Target".to_string()),
                ..BandLineConfig::default()
            }),
            ..BandConfig::default()
        };
        let band = config.resolve(&Band::default());
        assert_eq!(band.from, 5.0);
        assert_eq!(band.to, 0.0);
        assert_eq!(band.color, ColorSpec::Shared("red".to_string()));
        assert_eq!(band.band_line.label, "Target");
        assert_eq!(band.band_line.colour, DEFAULT_LINE_COLOUR);
        assert_eq!(band.band_line.line_type, LineType::Solid);
    }

    #[test]
    fn test_shared_mode_rejects_sequences() {
        let spec = ColorSpec::PerDataset(vec!["red".to_string()]);
        assert_eq!(spec.resolve(BandsMode::Backgrounds, 0), None);
        assert_eq!(spec.resolve(BandsMode::Palette, 0), Some("red"));
    }

    #[test]
    fn test_palette_wraps_by_dataset() {
        let spec = ColorSpec::PerDataset(vec!["red".to_string(), "blue".to_string()]);
        assert_eq!(spec.resolve(BandsMode::Palette, 1), Some("blue"));
        assert_eq!(spec.resolve(BandsMode::Palette, 2), Some("red"));
        assert_eq!(
            ColorSpec::PerDataset(Vec::new()).resolve(BandsMode::Palette, 0),
            None
        );
    }

    #[test]
    fn test_blank_shared_color_is_unusable() {
        assert_eq!(
            ColorSpec::Shared("  ".to_string()).resolve(BandsMode::Lines, 0),
            None
        );
    }

    #[test]
    fn test_font_string() {
        let style = BandLineStyle {
            font_style: "italic".to_string(),
            font_size: 14.0,
            font_family: "Arial".to_string(),
            ..BandLineStyle::default()
        };
        assert_eq!(style.font_string(), "italic 14px Arial");
    }
}
