//! The load → clip → mask → aggregate → fit pipeline behind the CLI.

use std::fs;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use mascon_common::{parse_iso8601, BoundingBox};
use mascon_grid::{TimeGrid, TimeGridData};
use region_mask::{build_mask, Region};
use trend_analysis::{aggregate, fit_trend, TimeSeries, TrendResult, Weighting};

use crate::Args;

/// JSON report printed to stdout.
#[derive(Debug, Serialize)]
pub struct TrendReport {
    /// Physical units of the grid values.
    pub units: String,
    /// Weighting used for the spatial mean.
    pub weighting: Weighting,
    /// Number of grid cells inside the region.
    pub cells_in_region: usize,
    /// The fitted trend.
    pub trend: TrendResult,
    /// Trend slope scaled to units per year.
    pub slope_per_year: f64,
    /// The aggregated series, when requested with --series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<TimeSeries>,
}

pub fn run(args: &Args) -> Result<TrendReport> {
    let grid_json = fs::read_to_string(&args.grid)
        .with_context(|| format!("reading grid dataset {}", args.grid.display()))?;
    let data: TimeGridData =
        serde_json::from_str(&grid_json).context("parsing grid dataset JSON")?;
    let grid = TimeGrid::try_from(data).context("validating grid dataset")?;

    // Explicit bounding-box selection fails fast when it misses the grid.
    let grid = match args.bbox.as_deref() {
        Some(s) => {
            let bbox = BoundingBox::from_param(s).context("parsing --bbox")?;
            grid.slice_bounds(&bbox).context("clipping grid to --bbox")?
        }
        None => grid,
    };

    let region_json = fs::read_to_string(&args.region)
        .with_context(|| format!("reading region {}", args.region.display()))?;
    let region = Region::from_geojson_str(&region_json).context("parsing region GeoJSON")?;

    // Clip to the region's bounding box first, as the full grid may be
    // global while the region covers a few degrees. A region bbox that
    // misses the grid entirely is left to the mask stage, which reports it
    // as an empty mask rather than a slicing error.
    let grid = match region.bbox().and_then(|b| b.intersection(&grid.bbox())) {
        Some(clip) => grid.slice_bounds(&clip).context("clipping grid to region")?,
        None => grid,
    };

    let (first_time, last_time) = grid
        .times()
        .first()
        .copied()
        .zip(grid.times().last().copied())
        .context("grid has no time steps")?;
    let start = resolve_time(args.start.as_deref(), || first_time)?;
    let end = resolve_time(args.end.as_deref(), || last_time)?;

    let mask = build_mask(grid.lats(), grid.lons(), &region);
    let series = aggregate(&grid, &mask, args.weighting)?;
    let trend = fit_trend(&series, start, end)?;

    Ok(TrendReport {
        units: grid.units().to_string(),
        weighting: args.weighting,
        cells_in_region: mask.count(),
        slope_per_year: trend.slope_per_year(),
        trend,
        series: args.series.then_some(series),
    })
}

fn resolve_time(
    arg: Option<&str>,
    default: impl FnOnce() -> DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    match arg {
        Some(s) => parse_iso8601(s).with_context(|| format!("parsing timestamp '{s}'")),
        None => Ok(default()),
    }
}
