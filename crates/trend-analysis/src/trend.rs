//! Ordinary least-squares trend fitting over a date sub-range.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mascon_common::{days_between, TimeRange};
use mascon_grid::TimeGrid;
use region_mask::{build_mask, Region};

use crate::aggregate::{aggregate, Weighting};
use crate::error::{Result, TrendError};
use crate::series::TimeSeries;

/// Result of a linear trend fit. Immutable; created fresh per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Slope in value units per day.
    pub slope: f64,
    /// Intercept in value units, at the epoch (the series' first time
    /// step). The epoch is a property of the series, not of the queried
    /// sub-range, so intercepts from different sub-range fits are
    /// comparable.
    pub intercept: f64,
    /// Start of the requested sub-range.
    pub start: DateTime<Utc>,
    /// End of the requested sub-range.
    pub end: DateTime<Utc>,
    /// Number of valid samples the line was fit to.
    pub n_samples: usize,
    /// Standard error of the slope. `None` when only 2 samples were fit,
    /// where the residual degrees of freedom are zero.
    pub standard_error: Option<f64>,
}

impl TrendResult {
    /// Slope scaled to value units per year (365.25 days).
    pub fn slope_per_year(&self) -> f64 {
        self.slope * 365.25
    }
}

/// Fit `value = slope · t + intercept` by ordinary least squares over the
/// samples with `start <= time <= end`, skipping no-data entries.
///
/// The time axis is fractional days since the series' first time step — a
/// fixed epoch shared by every query against the same series — so the
/// slope reads as units per day and the intercept does not shift with the
/// selected sub-range. Closed form: slope = cov(t, v) / var(t),
/// intercept = mean(v) − slope · mean(t). The standard error of the slope
/// is sqrt(RSS / (n − 2) / Σ(t − t̄)²).
///
/// Fails with [`TrendError::InvalidRange`] when `start > end` and with
/// [`TrendError::InsufficientData`] when fewer than 2 valid samples fall in
/// the range. Deterministic: identical inputs give bit-identical results.
pub fn fit_trend(
    series: &TimeSeries,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<TrendResult> {
    if start > end {
        return Err(TrendError::InvalidRange { start, end });
    }

    let samples: Vec<(DateTime<Utc>, f64)> = series
        .iter_valid()
        .filter(|(t, _)| *t >= start && *t <= end)
        .collect();

    let n = samples.len();
    if n < 2 {
        return Err(TrendError::InsufficientData { found: n });
    }

    // n >= 2 implies the series is non-empty.
    let epoch = series.times[0];
    let t: Vec<f64> = samples.iter().map(|&(ts, _)| days_between(epoch, ts)).collect();
    let v: Vec<f64> = samples.iter().map(|&(_, value)| value).collect();

    let nf = n as f64;
    let t_mean = t.iter().sum::<f64>() / nf;
    let v_mean = v.iter().sum::<f64>() / nf;

    // s_tt = Σ(t − t̄)², s_tv = Σ(t − t̄)(v − v̄)
    let mut s_tt = 0.0;
    let mut s_tv = 0.0;
    for i in 0..n {
        let dt = t[i] - t_mean;
        s_tt += dt * dt;
        s_tv += dt * (v[i] - v_mean);
    }

    let slope = s_tv / s_tt;
    let intercept = v_mean - slope * t_mean;

    let standard_error = if n == 2 {
        None
    } else {
        let rss: f64 = (0..n)
            .map(|i| {
                let residual = v[i] - (slope * t[i] + intercept);
                residual * residual
            })
            .sum();
        Some((rss / (nf - 2.0) / s_tt).sqrt())
    };

    tracing::debug!(n_samples = n, slope, "fit linear trend");

    Ok(TrendResult {
        slope,
        intercept,
        start,
        end,
        n_samples: n,
        standard_error,
    })
}

/// Run the whole pipeline in one call: mask the grid with the region,
/// aggregate to a time series, and fit a trend over `range`.
///
/// Returns both the series and the fit so callers can render the series
/// alongside the trend line.
pub fn region_trend(
    grid: &TimeGrid,
    region: &Region,
    weighting: Weighting,
    range: &TimeRange,
) -> Result<(TimeSeries, TrendResult)> {
    let mask = build_mask(grid.lats(), grid.lons(), region);
    let series = aggregate(grid, &mask, weighting)?;
    let trend = fit_trend(&series, range.start, range.end)?;
    Ok((series, trend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use mascon_grid::testdata;

    /// Exact series value = 2·t + 5 with t in days since the first sample.
    fn linear_series(n: usize) -> TimeSeries {
        let times = testdata::monthly_times(2009, n);
        let epoch = times[0];
        let values = times
            .iter()
            .map(|&ts| Some(2.0 * days_between(epoch, ts) + 5.0))
            .collect();
        TimeSeries::new(times, values)
    }

    fn full_span(series: &TimeSeries) -> (DateTime<Utc>, DateTime<Utc>) {
        (series.times[0], *series.times.last().unwrap())
    }

    #[test]
    fn test_fit_exact_line() {
        let series = linear_series(24);
        let (start, end) = full_span(&series);
        let result = fit_trend(&series, start, end).unwrap();

        assert_relative_eq!(result.slope, 2.0, epsilon = 1e-9);
        assert_relative_eq!(result.intercept, 5.0, epsilon = 1e-6);
        assert_eq!(result.n_samples, 24);
        assert!(result.standard_error.unwrap() < 1e-9);
    }

    #[test]
    fn test_fit_sub_range() {
        let series = linear_series(24);
        let start = Utc.with_ymd_and_hms(2009, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2010, 3, 1, 0, 0, 0).unwrap();
        let result = fit_trend(&series, start, end).unwrap();

        // The line is exact, so any sub-range recovers the same slope and,
        // with the axis anchored at the series' first time step, the same
        // intercept.
        assert_relative_eq!(result.slope, 2.0, epsilon = 1e-9);
        assert_relative_eq!(result.intercept, 5.0, epsilon = 1e-6);
        assert!(result.n_samples < 24);
        assert!(result.n_samples >= 2);
    }

    #[test]
    fn test_fit_sub_range_intercept_uses_series_epoch() {
        // Start the window three months in; the intercept must still read
        // at the series' first time step, not at the window's own start
        // (where the line is already well above 5).
        let series = linear_series(24);
        let start = series.times[3];
        let end = *series.times.last().unwrap();
        let result = fit_trend(&series, start, end).unwrap();

        assert_eq!(result.n_samples, 21);
        assert_relative_eq!(result.slope, 2.0, epsilon = 1e-9);
        assert_relative_eq!(result.intercept, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let series = linear_series(12);
        let (start, end) = full_span(&series);
        let a = fit_trend(&series, start, end).unwrap();
        let b = fit_trend(&series, start, end).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fit_two_samples_has_no_standard_error() {
        let series = linear_series(2);
        let (start, end) = full_span(&series);
        let result = fit_trend(&series, start, end).unwrap();

        assert_eq!(result.n_samples, 2);
        assert_eq!(result.standard_error, None);
        assert_relative_eq!(result.slope, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fit_skips_no_data_entries() {
        let mut series = linear_series(12);
        series.values[3] = None;
        series.values[7] = None;
        let (start, end) = full_span(&series);
        let result = fit_trend(&series, start, end).unwrap();

        assert_eq!(result.n_samples, 10);
        assert_relative_eq!(result.slope, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fit_invalid_range() {
        let series = linear_series(12);
        let (start, end) = full_span(&series);
        let result = fit_trend(&series, end, start);
        assert!(matches!(result, Err(TrendError::InvalidRange { .. })));
    }

    #[test]
    fn test_fit_insufficient_data() {
        let series = linear_series(12);
        let start = series.times[0];
        let result = fit_trend(&series, start, start);
        assert!(matches!(
            result,
            Err(TrendError::InsufficientData { found: 1 })
        ));
    }

    #[test]
    fn test_slope_per_year() {
        let series = linear_series(12);
        let (start, end) = full_span(&series);
        let result = fit_trend(&series, start, end).unwrap();
        assert_relative_eq!(result.slope_per_year(), 2.0 * 365.25, epsilon = 1e-6);
    }
}
