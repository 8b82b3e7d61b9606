//! One-shot mascon trend CLI.
//!
//! Loads a JSON-encoded time/lat/lon grid dataset and a GeoJSON region,
//! clips the grid to the region's bounding box, masks it to the region,
//! reduces it to a spatial-mean time series, and fits a linear trend over
//! the requested date range. Prints a JSON report to stdout.

mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use trend_analysis::Weighting;

#[derive(Parser, Debug)]
#[command(name = "trend-cli")]
#[command(about = "Fit a linear mass-anomaly trend over a GeoJSON region")]
pub struct Args {
    /// Path to the grid dataset (JSON: times, lats, lons, values, fill_value)
    #[arg(long)]
    pub grid: PathBuf,

    /// Path to the region definition (GeoJSON Polygon/MultiPolygon)
    #[arg(long)]
    pub region: PathBuf,

    /// Pre-clip the grid to a bounding box: "minlon,minlat,maxlon,maxlat"
    #[arg(long)]
    pub bbox: Option<String>,

    /// Start of the trend window (ISO 8601; default: first grid time)
    #[arg(long)]
    pub start: Option<String>,

    /// End of the trend window (ISO 8601; default: last grid time)
    #[arg(long)]
    pub end: Option<String>,

    /// Spatial weighting: uniform | area
    #[arg(long, default_value_t = Weighting::Uniform)]
    pub weighting: Weighting,

    /// Include the aggregated time series in the report
    #[arg(long)]
    pub series: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(grid = %args.grid.display(), region = %args.region.display(), "running trend analysis");

    let report = pipeline::run(&args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
