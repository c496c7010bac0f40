//! Common test utilities for band rendering.
//!
//! Builds in-memory charts with a 0..50 y-axis over a 100px-tall chart area,
//! so value `v` sits at pixel `100 - 2v`.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use chartbands::host::StaticDataset;
use chartbands::render::{DrawCommand, RecordedGradient};
use chartbands::{
    BandConfig, BandLineConfig, BandsConfig, BandsMode, ChartArea, ColorSpec, StaticChart,
    YValue,
};

pub const EPSILON: f64 = 1e-9;

/// Install a test-writer subscriber once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("chartbands=debug"))
        .with_test_writer()
        .try_init();
}

pub fn area() -> ChartArea {
    ChartArea {
        top: 0.0,
        left: 0.0,
        right: 100.0,
        bottom: 100.0,
    }
}

/// A chart of `chart_type` with one dataset per border color.
pub fn chart(chart_type: &str, border_colors: &[&str]) -> StaticChart<RecordedGradient> {
    border_colors.iter().fold(
        StaticChart::new(chart_type, 0.0, 50.0, area(), 100.0),
        |chart, &color| chart.with_dataset(StaticDataset::new(Some(color), Some(color))),
    )
}

/// A band with a shared color and an optional rule line.
pub fn band(from: f64, to: f64, color: &str, y_value: Option<f64>) -> BandConfig {
    BandConfig {
        from: Some(from),
        to: Some(to),
        y_value: Some(y_value.map_or(YValue::Unset, YValue::Value)),
        color: Some(ColorSpec::Shared(color.to_string())),
        ..BandConfig::default()
    }
}

pub fn with_background(mut band: BandConfig, color: &str) -> BandConfig {
    band.background_color = Some(color.to_string());
    band
}

pub fn with_label(mut band: BandConfig, label: &str) -> BandConfig {
    band.band_line = Some(BandLineConfig {
        label: Some(label.to_string()),
        ..BandLineConfig::default()
    });
    band
}

pub fn config(mode: BandsMode, bands: Vec<BandConfig>) -> BandsConfig {
    BandsConfig {
        mode,
        bands,
        defaults: None,
    }
}

pub fn assert_approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Fill styles in the order they were set.
pub fn fill_styles(commands: &[DrawCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::SetFillStyle { color } => Some(color.clone()),
            _ => None,
        })
        .collect()
}

/// Stroke styles in the order they were set.
pub fn stroke_styles(commands: &[DrawCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::SetStrokeStyle { color } => Some(color.clone()),
            _ => None,
        })
        .collect()
}
