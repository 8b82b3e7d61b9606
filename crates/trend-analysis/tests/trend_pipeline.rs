//! End-to-end pipeline tests: GeoJSON region → mask → aggregate → fit.

use approx::assert_relative_eq;
use chrono::{DateTime, Utc};

use mascon_common::TimeRange;
use mascon_grid::testdata;
use region_mask::{build_mask, Region};
use trend_analysis::{aggregate, fit_trend, region_trend, TrendError, Weighting};

fn covering_region() -> Region {
    Region::from_geojson_str(
        r#"{"type": "Polygon", "coordinates": [[[-5, -5], [95, -5], [95, 89], [-5, 89], [-5, -5]]]}"#,
    )
    .unwrap()
}

fn full_range(times: &[DateTime<Utc>]) -> TimeRange {
    TimeRange::new(times[0], *times.last().unwrap())
}

#[test]
fn test_ramp_grid_recovers_slope() {
    let grid = testdata::ramp_grid(24, 4, 4, 0.03, -12.0);
    let range = full_range(grid.times());
    let (series, trend) = region_trend(&grid, &covering_region(), Weighting::Uniform, &range)
        .unwrap();

    assert_eq!(series.len(), 24);
    assert_eq!(trend.n_samples, 24);
    assert_relative_eq!(trend.slope, 0.03, epsilon = 1e-9);
    assert_relative_eq!(trend.intercept, -12.0, epsilon = 1e-6);
    assert!(trend.standard_error.unwrap() < 1e-9);
}

#[test]
fn test_covering_region_equals_plain_mean() {
    // With a region covering the whole extent and uniform weighting, each
    // series value must equal the simple mean over non-fill cells.
    let grid = testdata::fill_column_grid(3, 3, 4, 2.5);
    let mask = build_mask(grid.lats(), grid.lons(), &covering_region());
    assert_eq!(mask.count(), 12);

    let series = aggregate(&grid, &mask, Weighting::Uniform).unwrap();
    for value in &series.values {
        assert_relative_eq!(value.unwrap(), 2.5);
    }
}

#[test]
fn test_partial_region_masks_subset() {
    // Region covering only the cell at (lat 10, lon 10) of a pattern grid.
    let region = Region::from_geojson_str(
        r#"{"type": "Polygon", "coordinates": [[[8, 8], [12, 8], [12, 12], [8, 12], [8, 8]]]}"#,
    )
    .unwrap();
    let grid = testdata::pattern_grid(2, 3, 3);
    let mask = build_mask(grid.lats(), grid.lons(), &region);
    assert_eq!(mask.count(), 1);

    let series = aggregate(&grid, &mask, Weighting::Uniform).unwrap();
    // value = t·1_000_000 + 1_001 at (y, x) = (1, 1)
    assert_relative_eq!(series.values[0].unwrap(), 1_001.0);
    assert_relative_eq!(series.values[1].unwrap(), 1_001_001.0);
}

#[test]
fn test_region_outside_grid_is_empty_mask_error() {
    let region = Region::from_geojson_str(
        r#"{"type": "Polygon", "coordinates": [[[120, -60], [140, -60], [140, -40], [120, -40], [120, -60]]]}"#,
    )
    .unwrap();
    let grid = testdata::pattern_grid(3, 3, 3);

    let mask = build_mask(grid.lats(), grid.lons(), &region);
    assert_eq!(mask.count(), 0);

    let range = full_range(grid.times());
    let result = region_trend(&grid, &region, Weighting::Uniform, &range);
    assert!(matches!(result, Err(TrendError::EmptyMask)));
}

#[test]
fn test_pipeline_is_deterministic() {
    let grid = testdata::ramp_grid(18, 3, 3, -0.011, 4.0);
    let range = full_range(grid.times());
    let a = region_trend(&grid, &covering_region(), Weighting::Area, &range).unwrap();
    let b = region_trend(&grid, &covering_region(), Weighting::Area, &range).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_sub_range_query_after_aggregation() {
    // Aggregate once, then fit over a narrower window, as an interactive
    // caller re-querying with new dates would.
    let grid = testdata::ramp_grid(36, 3, 3, 0.5, 0.0);
    let mask = build_mask(grid.lats(), grid.lons(), &covering_region());
    let series = aggregate(&grid, &mask, Weighting::Uniform).unwrap();

    let start = grid.times()[6];
    let end = grid.times()[20];
    let trend = fit_trend(&series, start, end).unwrap();

    assert_eq!(trend.n_samples, 15);
    assert_relative_eq!(trend.slope, 0.5, epsilon = 1e-9);
    assert_eq!(trend.start, start);
    assert_eq!(trend.end, end);
}
