//! CLI tool for chartbands - runs a band scenario headlessly and outputs JSON
//!
//! The scenario file holds a chart and its band options:
//!
//! ```json
//! {
//!   "chart": { "type": "line", "height": 300,
//!              "area": { "top": 20, "left": 40, "right": 580, "bottom": 280 },
//!              "yAxis": { "min": 0, "max": 100 },
//!              "datasets": [{ "borderColor": "#4472C4" }] },
//!   "options": { "bands": [{ "from": 0, "to": 30, "yValue": 30, "color": "green" }] }
//! }
//! ```
//!
//! Usage:
//!   chartbands_cli <scenario.json>              # Output JSON to stdout
//!   chartbands_cli <scenario.json> -o out.json  # Output JSON to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use chartbands::host::StaticChartConfig;
use chartbands::render::{RecordedGradient, RecordingSurface};
use chartbands::{BandsConfig, BandsPlugin, StaticChart};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
struct Scenario {
    chart: StaticChartConfig,
    #[serde(default)]
    options: BandsConfig,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: chartbands_cli <scenario.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read input file
    let data = match fs::read_to_string(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let scenario: Scenario = match serde_json::from_str(&data) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing scenario: {}", e);
            std::process::exit(1);
        }
    };

    // Run the full lifecycle once
    let mut chart: StaticChart<RecordedGradient> = scenario.chart.into_chart();
    let mut surface = RecordingSurface::new();
    let mut plugin = BandsPlugin::new(scenario.options);

    plugin.on_init(&chart);
    plugin.on_scale_update(&mut chart, &mut surface);
    let gradient_commands = surface.take_commands();
    plugin.on_draw(&chart, &mut surface);

    let datasets: Vec<_> = chart
        .datasets
        .iter()
        .map(|d| {
            serde_json::json!({
                "borderColor": d.border_color,
                "backgroundColor": d.background_color,
            })
        })
        .collect();
    let warnings: Vec<String> = plugin
        .take_warnings()
        .iter()
        .map(ToString::to_string)
        .collect();

    let report = serde_json::json!({
        "state": format!("{:?}", plugin.state()),
        "datasets": datasets,
        "gradientCommands": gradient_commands,
        "drawCommands": surface.commands(),
        "warnings": warnings,
    });

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
