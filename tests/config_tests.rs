//! Tests for parsing and resolving band options.
//!
//! Options arrive as loosely typed chart configuration, e.g.:
//! ```json
//! { "mode": "backgrounds",
//!   "bands": [{ "from": 0, "to": 10, "yValue": 5, "color": "green",
//!               "bandLine": { "type": "dashed", "label": "Low", "fontSize": "14" } }] }
//! ```
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use chartbands::{
    BandsConfig, BandsError, BandsMode, ColorSpec, LineType, YValue, DEFAULT_BAND_COLOR,
    DEFAULT_FONT_FAMILY, DEFAULT_LINE_COLOUR, DEFAULT_LINE_STROKE,
};
use test_case::test_case;

#[test]
fn test_empty_options() {
    let config = BandsConfig::from_json("{}").unwrap();
    assert_eq!(config.mode, BandsMode::Backgrounds);
    assert!(config.bands.is_empty());
    assert!(config.resolved_bands().is_empty());
}

#[test]
fn test_band_with_no_fields_gets_defaults() {
    let config = BandsConfig::from_json(r#"{ "bands": [{}] }"#).unwrap();
    let band = &config.resolved_bands()[0];

    assert_eq!(band.from, 0.0);
    assert_eq!(band.to, 0.0);
    assert_eq!(band.y_value, YValue::Unset);
    assert_eq!(
        band.color,
        ColorSpec::PerDataset(vec![DEFAULT_BAND_COLOR.to_string()])
    );
    assert_eq!(band.background_color, None);
    assert_eq!(band.band_line.stroke, DEFAULT_LINE_STROKE);
    assert_eq!(band.band_line.colour, DEFAULT_LINE_COLOUR);
    assert_eq!(band.band_line.line_type, LineType::Solid);
    assert_eq!(band.band_line.label, "");
    assert_eq!(band.band_line.font_size, 12.0);
    assert_eq!(band.band_line.font_family, DEFAULT_FONT_FAMILY);
    assert_eq!(band.band_line.font_style, "normal");
}

#[test]
fn test_full_band() {
    let json = r#"{
        "mode": "lines",
        "bands": [{
            "from": 0, "to": 10, "yValue": 5, "color": "green",
            "backgroundColor": "rgba(0, 255, 0, 0.1)",
            "bandLine": {
                "stroke": 2, "colour": "red", "type": "dashed", "label": "Low",
                "fontSize": "14", "fontFamily": "serif", "fontStyle": "italic"
            }
        }]
    }"#;
    let config = BandsConfig::from_json(json).unwrap();
    let band = &config.resolved_bands()[0];

    assert_eq!(config.mode, BandsMode::Lines);
    assert_eq!((band.from, band.to), (0.0, 10.0));
    assert_eq!(band.y_value.value(), Some(5.0));
    assert_eq!(band.color, ColorSpec::Shared("green".to_string()));
    assert_eq!(band.background_color.as_deref(), Some("rgba(0, 255, 0, 0.1)"));
    assert_eq!(band.band_line.stroke, 2.0);
    assert_eq!(band.band_line.line_type, LineType::Dashed);
    assert_eq!(band.band_line.font_size, 14.0);
    assert_eq!(band.band_line.font_string(), "italic 14px serif");
}

#[test]
fn test_partial_band_line_merges_with_defaults() {
    let json = r#"{ "bands": [{ "yValue": 5, "bandLine": { "label": "Only label" } }] }"#;
    let band = &BandsConfig::from_json(json).unwrap().resolved_bands()[0];
    assert_eq!(band.band_line.label, "Only label");
    assert_eq!(band.band_line.colour, DEFAULT_LINE_COLOUR);
    assert_eq!(band.band_line.stroke, DEFAULT_LINE_STROKE);
}

#[test_case("false" ; "conventional false")]
#[test_case("null" ; "null")]
#[test_case(r#""5""# ; "numeric string")]
#[test_case("true" ; "true")]
fn test_non_numeric_y_value_is_unset(value: &str) {
    let json = format!(r#"{{ "bands": [{{ "yValue": {value} }}] }}"#);
    let band = &BandsConfig::from_json(&json).unwrap().resolved_bands()[0];
    assert_eq!(band.y_value, YValue::Unset);
}

#[test_case("\"dashed\"", LineType::Dashed ; "dashed")]
#[test_case("\"DASHED\"", LineType::Dashed ; "uppercase dashed")]
#[test_case("\"solid\"", LineType::Solid ; "solid")]
#[test_case("\"dotted\"", LineType::Solid ; "unknown falls back to solid")]
fn test_line_type(value: &str, expected: LineType) {
    let json = format!(r#"{{ "bands": [{{ "bandLine": {{ "type": {value} }} }}] }}"#);
    let band = &BandsConfig::from_json(&json).unwrap().resolved_bands()[0];
    assert_eq!(band.band_line.line_type, expected);
}

#[test]
fn test_color_shapes() {
    let json = r#"{ "bands": [
        { "color": "red" },
        { "color": ["red", "green"] },
        { "color": 42 }
    ] }"#;
    let bands = BandsConfig::from_json(json).unwrap().resolved_bands();

    assert_eq!(bands[0].color, ColorSpec::Shared("red".to_string()));
    assert_eq!(
        bands[1].color,
        ColorSpec::PerDataset(vec!["red".to_string(), "green".to_string()])
    );
    assert!(matches!(bands[2].color, ColorSpec::Unusable(_)));
}

#[test_case(BandsMode::Lines, 0, None ; "sequence rejected in lines mode")]
#[test_case(BandsMode::Backgrounds, 0, None ; "sequence rejected in backgrounds mode")]
#[test_case(BandsMode::Palette, 0, Some("red") ; "palette first dataset")]
#[test_case(BandsMode::Palette, 3, Some("green") ; "palette wraps")]
fn test_sequence_color_resolution(mode: BandsMode, dataset: usize, expected: Option<&str>) {
    let color = ColorSpec::PerDataset(vec!["red".to_string(), "green".to_string()]);
    assert_eq!(color.resolve(mode, dataset), expected);
}

#[test]
fn test_chart_wide_defaults() {
    let json = r#"{
        "defaults": { "color": "orange", "bandLine": { "colour": "gray", "type": "dashed" } },
        "bands": [
            { "from": 0, "to": 5 },
            { "from": 5, "to": 9, "color": "red", "bandLine": { "label": "High" } }
        ]
    }"#;
    let bands = BandsConfig::from_json(json).unwrap().resolved_bands();

    assert_eq!(bands[0].color, ColorSpec::Shared("orange".to_string()));
    assert_eq!(bands[0].band_line.colour, "gray");
    assert_eq!(bands[1].color, ColorSpec::Shared("red".to_string()));
    assert_eq!(bands[1].band_line.colour, "gray");
    assert_eq!(bands[1].band_line.line_type, LineType::Dashed);
    assert_eq!(bands[1].band_line.label, "High");
}

#[test]
fn test_malformed_json_is_config_error() {
    let err = BandsConfig::from_json("{ bands: ").unwrap_err();
    assert!(matches!(err, BandsError::Config(_)));
}

#[test]
fn test_unknown_mode_is_config_error() {
    assert!(BandsConfig::from_json(r#"{ "mode": "sparkles" }"#).is_err());
}

#[test]
fn test_resolve_bands_returns_json() {
    let options = r#"{ "bands": [{ "from": 1, "to": 2, "yValue": false }] }"#;
    let json = chartbands::resolve_bands(options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["from"], 1.0);
    assert_eq!(value[0]["yValue"], false);
    assert_eq!(value[0]["bandLine"]["type"], "solid");
}
