//! Synthetic grid builders for unit and integration tests.
//!
//! Grids built here are small (a handful of cells per axis) with known value
//! patterns so that slicing, masking, and aggregation results can be checked
//! exactly.

use chrono::{DateTime, TimeZone, Utc};

use crate::grid::TimeGrid;

/// Fill sentinel used by the synthetic grids.
pub const FILL: f64 = -9999.0;

/// Monthly timestamps (the 15th of each month, midnight UTC), starting in
/// January of `start_year`. Mirrors the roughly-monthly cadence of mascon
/// solutions.
pub fn monthly_times(start_year: i32, n: usize) -> Vec<DateTime<Utc>> {
    (0..n)
        .map(|i| {
            let year = start_year + (i / 12) as i32;
            let month = (i % 12) as u32 + 1;
            Utc.with_ymd_and_hms(year, month, 15, 0, 0, 0).unwrap()
        })
        .collect()
}

/// Build a grid from a value function of (t, y, x) indices.
///
/// Coordinates are `lat = 10·y`, `lon = 10·x`, so `ny`/`nx` must stay ≤ 10
/// to keep latitudes geographic.
pub fn grid_from_fn(
    nt: usize,
    ny: usize,
    nx: usize,
    f: impl Fn(usize, usize, usize) -> f64,
) -> TimeGrid {
    let times = monthly_times(2009, nt);
    let lats: Vec<f64> = (0..ny).map(|y| 10.0 * y as f64).collect();
    let lons: Vec<f64> = (0..nx).map(|x| 10.0 * x as f64).collect();

    let mut values = Vec::with_capacity(nt * ny * nx);
    for t in 0..nt {
        for y in 0..ny {
            for x in 0..nx {
                values.push(f(t, y, x));
            }
        }
    }

    TimeGrid::new(times, lats, lons, values, FILL, "cm").expect("synthetic grid is valid")
}

/// Grid where value = t·1_000_000 + y·1_000 + x, making it easy to verify
/// which cell a value came from after slicing.
pub fn pattern_grid(nt: usize, ny: usize, nx: usize) -> TimeGrid {
    grid_from_fn(nt, ny, nx, |t, y, x| {
        (t * 1_000_000 + y * 1_000 + x) as f64
    })
}

/// Spatially constant grid: every cell at time step `t` holds
/// `slope · days(t) + intercept`, where days are counted from the first
/// timestamp. Aggregating any region of this grid yields an exactly linear
/// series.
pub fn ramp_grid(nt: usize, ny: usize, nx: usize, slope_per_day: f64, intercept: f64) -> TimeGrid {
    let times = monthly_times(2009, nt);
    let epoch = times[0];
    grid_from_fn(nt, ny, nx, |t, _y, _x| {
        let days = mascon_common::days_between(epoch, times[t]);
        slope_per_day * days + intercept
    })
}

/// Constant grid with the `x == 0` column marked as fill at every time step.
pub fn fill_column_grid(nt: usize, ny: usize, nx: usize, value: f64) -> TimeGrid {
    grid_from_fn(nt, ny, nx, |_t, _y, x| if x == 0 { FILL } else { value })
}
