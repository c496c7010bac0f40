//! Lifecycle tests for `BandsPlugin` against an in-memory chart.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use chartbands::diagnostics::MAX_WARNINGS;
use chartbands::host::StaticDataset;
use chartbands::render::{RecordingSurface, CHART_DEFAULT_COLOR};
use chartbands::{
    BandsError, BandsMode, BandsPlugin, ChartHost, ColorProperty, ColorSpec, Fill, PluginState,
    StaticChart,
};
use test_case::test_case;

use common::{
    area, band, chart, config, fill_styles, init_tracing, stroke_styles, with_background,
    with_label,
};

fn initialized(mode: BandsMode, bands: Vec<chartbands::BandConfig>) -> BandsPlugin {
    let mut plugin = BandsPlugin::new(config(mode, bands));
    plugin.on_init(&chart("line", &["blue"]));
    plugin
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn test_line_chart_targets_border_color() {
    init_tracing();
    let mut plugin = BandsPlugin::new(config(BandsMode::Backgrounds, vec![]));
    plugin.on_init(&chart("line", &["blue", "red"]));

    assert_eq!(
        plugin.state(),
        PluginState::Active {
            property: ColorProperty::BorderColor
        }
    );
    assert_eq!(plugin.base_colors(), &["blue".to_string(), "red".to_string()]);
    assert!(plugin.warnings().is_empty());
}

#[test]
fn test_bubble_chart_targets_background_color() {
    let mut plugin = BandsPlugin::new(config(BandsMode::Backgrounds, vec![]));
    plugin.on_init(&chart("bubble", &["blue"]));
    assert_eq!(
        plugin.state(),
        PluginState::Active {
            property: ColorProperty::BackgroundColor
        }
    );
}

#[test]
fn test_dataset_without_color_gets_chart_default() {
    let host: StaticChart = StaticChart::new("line", 0.0, 50.0, area(), 100.0)
        .with_dataset(StaticDataset::new(None, None));
    let mut plugin = BandsPlugin::new(config(BandsMode::Backgrounds, vec![]));
    plugin.on_init(&host);
    assert_eq!(plugin.base_colors(), &[CHART_DEFAULT_COLOR.to_string()]);
}

#[test]
fn test_unsupported_chart_type_disables_every_hook() {
    init_tracing();
    let mut host = chart("bar", &["blue"]);
    let mut plugin = BandsPlugin::new(config(
        BandsMode::Backgrounds,
        vec![with_background(band(0.0, 10.0, "red", Some(5.0)), "pink")],
    ));
    let mut surface = RecordingSurface::new();

    plugin.on_init(&host);
    plugin.on_scale_update(&mut host, &mut surface);
    plugin.on_draw(&host, &mut surface);

    assert_eq!(plugin.state(), PluginState::Unsupported);
    assert!(surface.is_empty());
    assert_eq!(
        host.datasets[0].border_color,
        Some(Fill::Flat("blue".to_string()))
    );
    let warnings = plugin.take_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(matches!(&warnings[0], BandsError::UnsupportedChartType(t) if t == "bar"));
}

#[test]
fn test_hooks_before_init_do_nothing() {
    let mut host = chart("line", &["blue"]);
    let mut plugin = BandsPlugin::new(config(
        BandsMode::Backgrounds,
        vec![band(0.0, 10.0, "red", Some(5.0))],
    ));
    let mut surface = RecordingSurface::new();

    plugin.on_scale_update(&mut host, &mut surface);
    plugin.on_draw(&host, &mut surface);

    assert_eq!(plugin.state(), PluginState::Uninitialized);
    assert!(surface.is_empty());
}

#[test]
fn test_instances_do_not_share_state() {
    let mut supported = BandsPlugin::new(config(BandsMode::Backgrounds, vec![]));
    let mut unsupported = BandsPlugin::new(config(BandsMode::Backgrounds, vec![]));

    supported.on_init(&chart("line", &["blue"]));
    unsupported.on_init(&chart("pie", &["red"]));

    assert!(matches!(supported.state(), PluginState::Active { .. }));
    assert_eq!(unsupported.state(), PluginState::Unsupported);
    assert_eq!(supported.base_colors(), &["blue".to_string()]);
    assert!(unsupported.base_colors().is_empty());
    assert!(supported.warnings().is_empty());
}

#[test]
fn test_reinit_takes_a_fresh_snapshot() {
    let mut plugin = BandsPlugin::new(config(BandsMode::Backgrounds, vec![]));
    plugin.on_init(&chart("line", &["blue"]));
    plugin.on_init(&chart("line", &["red", "green"]));
    assert_eq!(plugin.base_colors(), &["red".to_string(), "green".to_string()]);
}

// ============================================================================
// Scale updates
// ============================================================================

#[test]
fn test_scale_update_writes_gradient_per_dataset() {
    let mut host = chart("line", &["blue", "red"]);
    let mut plugin = BandsPlugin::new(config(
        BandsMode::Backgrounds,
        vec![band(0.0, 10.0, "green", Some(5.0))],
    ));
    let mut surface = RecordingSurface::new();

    plugin.on_init(&host);
    plugin.on_scale_update(&mut host, &mut surface);

    for (dataset, base) in host.datasets.iter().zip(["blue", "red"]) {
        let gradient = dataset
            .border_color
            .as_ref()
            .and_then(Fill::gradient)
            .expect("gradient");
        assert_eq!(gradient.stops.len(), 3);
        assert_eq!(gradient.stops[0].colour, "green");
        assert_eq!(gradient.stops[2].colour, base);
    }
    // Fill slot is untouched on line charts.
    assert_eq!(
        host.datasets[0].background_color,
        Some(Fill::Flat("blue".to_string()))
    );
}

#[test]
fn test_repeated_scale_updates_keep_base_color() {
    let mut host = chart("line", &["blue"]);
    let mut plugin = BandsPlugin::new(config(
        BandsMode::Backgrounds,
        vec![band(0.0, 10.0, "green", None)],
    ));
    let mut surface = RecordingSurface::new();

    plugin.on_init(&host);
    plugin.on_scale_update(&mut host, &mut surface);
    plugin.on_scale_update(&mut host, &mut surface);

    let gradient = host.datasets[0]
        .border_color
        .as_ref()
        .and_then(Fill::gradient)
        .expect("gradient");
    assert_eq!(gradient.stops.last().unwrap().colour, "blue");
}

#[test]
fn test_bad_band_color_keeps_flat_base() {
    let mut host = chart("bubble", &["blue"]);
    let mut bad = band(0.0, 10.0, "green", None);
    bad.color = Some(ColorSpec::Unusable(serde_json::json!(42)));
    let mut plugin = BandsPlugin::new(config(BandsMode::Backgrounds, vec![bad]));
    let mut surface = RecordingSurface::new();

    plugin.on_init(&host);
    plugin.on_scale_update(&mut host, &mut surface);

    assert_eq!(
        host.dataset_color(0, ColorProperty::BackgroundColor),
        Some("blue".to_string())
    );
    assert!(matches!(
        plugin.warnings()[0],
        BandsError::InvalidColorDescriptor { band: 0, dataset: 0 }
    ));
}

#[test_case(ColorSpec::Shared("not-a-color".to_string()) ; "color the surface rejects")]
#[test_case(ColorSpec::Unusable(serde_json::json!(42)) ; "color of the wrong shape")]
fn test_fixed_band_color_applies_on_next_scale_update(bad: ColorSpec) {
    let mut host = chart("line", &["blue"]);
    let mut broken = band(0.0, 10.0, "green", None);
    broken.color = Some(bad);
    let mut plugin = BandsPlugin::new(config(BandsMode::Backgrounds, vec![broken]));
    let mut surface = RecordingSurface::new();

    plugin.on_init(&host);
    plugin.on_scale_update(&mut host, &mut surface);
    assert_eq!(
        host.datasets[0].border_color,
        Some(Fill::Flat("blue".to_string()))
    );
    assert_eq!(plugin.take_warnings().len(), 1);

    plugin.config_mut().bands[0].color = Some(ColorSpec::Shared("green".to_string()));
    plugin.on_scale_update(&mut host, &mut surface);

    let gradient = host.datasets[0]
        .border_color
        .as_ref()
        .and_then(Fill::gradient)
        .expect("gradient after the color is fixed");
    assert_eq!(gradient.stops[0].colour, "green");
    assert_eq!(gradient.stops[2].colour, "blue");
    assert!(plugin.warnings().is_empty());
}

#[test]
fn test_palette_mode_colors_datasets_independently() {
    let mut host = chart("line", &["blue", "blue"]);
    let mut multi = band(0.0, 10.0, "unused", None);
    multi.color = Some(ColorSpec::PerDataset(vec![
        "red".to_string(),
        "green".to_string(),
    ]));
    let mut plugin = BandsPlugin::new(config(BandsMode::Palette, vec![multi]));
    let mut surface = RecordingSurface::new();

    plugin.on_init(&host);
    plugin.on_scale_update(&mut host, &mut surface);

    let first_stop = |i: usize| {
        host.datasets[i]
            .border_color
            .as_ref()
            .and_then(Fill::gradient)
            .map(|g| g.stops[0].colour.clone())
    };
    assert_eq!(first_stop(0).as_deref(), Some("red"));
    assert_eq!(first_stop(1).as_deref(), Some("green"));
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_bands_draw_last_declared_first() {
    let host = chart("line", &["blue"]);
    let mut plugin = BandsPlugin::new(config(
        BandsMode::Backgrounds,
        vec![
            with_background(band(0.0, 10.0, "red", Some(5.0)), "bg-a"),
            with_background(band(10.0, 20.0, "red", Some(15.0)), "bg-b"),
            with_background(band(20.0, 30.0, "red", Some(25.0)), "bg-c"),
        ],
    ));
    let mut surface = RecordingSurface::new();

    plugin.on_init(&host);
    plugin.on_draw(&host, &mut surface);

    assert_eq!(fill_styles(surface.commands()), vec!["bg-c", "bg-b", "bg-a"]);
    assert_eq!(surface.fill_count(), 3);
    assert_eq!(surface.stroke_count(), 3);
}

#[test]
fn test_lines_mode_skips_backgrounds() {
    let host = chart("line", &["blue"]);
    let mut plugin = initialized(
        BandsMode::Lines,
        vec![with_background(band(0.0, 10.0, "red", Some(5.0)), "pink")],
    );
    let mut surface = RecordingSurface::new();

    plugin.on_draw(&host, &mut surface);

    assert_eq!(surface.fill_count(), 0);
    assert_eq!(surface.stroke_count(), 1);
}

#[test]
fn test_missing_y_value_still_draws_background() {
    let host = chart("line", &["blue"]);
    let mut plugin = initialized(
        BandsMode::Backgrounds,
        vec![with_background(band(0.0, 10.0, "red", None), "pink")],
    );
    let mut surface = RecordingSurface::new();

    plugin.on_draw(&host, &mut surface);

    assert_eq!(surface.fill_count(), 1);
    assert_eq!(surface.stroke_count(), 0);
    assert!(matches!(
        plugin.warnings(),
        [BandsError::MissingYValue { band: 0 }]
    ));
}

#[test]
fn test_labelled_band_draws_label() {
    let host = chart("line", &["blue"]);
    let mut plugin = initialized(
        BandsMode::Lines,
        vec![with_label(band(0.0, 10.0, "red", Some(5.0)), "Limit")],
    );
    let mut surface = RecordingSurface::new();

    plugin.on_draw(&host, &mut surface);

    assert_eq!(surface.stroke_count(), 2);
    assert!(stroke_styles(surface.commands())
        .iter()
        .all(|c| c == chartbands::DEFAULT_LINE_COLOUR));
}

#[test]
fn test_config_edits_apply_on_next_draw() {
    let host = chart("line", &["blue"]);
    let mut plugin = initialized(BandsMode::Lines, vec![]);
    let mut surface = RecordingSurface::new();

    plugin.on_draw(&host, &mut surface);
    assert!(surface.is_empty());

    plugin
        .config_mut()
        .bands
        .push(band(0.0, 10.0, "red", Some(5.0)));
    plugin.on_draw(&host, &mut surface);
    assert_eq!(surface.stroke_count(), 1);
}

#[test]
fn test_take_warnings_drains() {
    let host = chart("line", &["blue"]);
    let mut plugin = initialized(BandsMode::Lines, vec![band(0.0, 10.0, "red", None)]);
    let mut surface = RecordingSurface::new();

    plugin.on_draw(&host, &mut surface);
    assert_eq!(plugin.take_warnings().len(), 1);
    assert!(plugin.take_warnings().is_empty());
}

#[test]
fn test_warnings_stay_bounded_across_redraws() {
    let host = chart("line", &["blue"]);
    let mut plugin = initialized(BandsMode::Lines, vec![band(0.0, 10.0, "red", None)]);
    let mut surface = RecordingSurface::new();

    for _ in 0..10_000 {
        plugin.on_draw(&host, &mut surface);
    }

    assert_eq!(plugin.warnings().len(), 1);
}

#[test]
fn test_warnings_capped_for_many_failing_bands() {
    let host = chart("line", &["blue"]);
    let bands = (0..MAX_WARNINGS + 20)
        .map(|_| band(0.0, 10.0, "red", None))
        .collect();
    let mut plugin = initialized(BandsMode::Lines, bands);
    let mut surface = RecordingSurface::new();

    for _ in 0..100 {
        plugin.on_draw(&host, &mut surface);
    }

    assert_eq!(plugin.warnings().len(), MAX_WARNINGS);
}
