//! Aggregated time series with no-data flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scalar per grid time step, produced by spatial aggregation.
///
/// A `None` entry marks a time step where the region held no valid
/// measurements (every in-region cell was fill). No-data steps are kept in
/// place rather than dropped so the series stays aligned with the grid's
/// time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub times: Vec<DateTime<Utc>>,
    pub values: Vec<Option<f64>>,
}

impl TimeSeries {
    /// Pair up times and values.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ; the series must stay aligned with the
    /// grid's time axis.
    pub fn new(times: Vec<DateTime<Utc>>, values: Vec<Option<f64>>) -> Self {
        assert_eq!(
            times.len(),
            values.len(),
            "times and values must have the same length"
        );
        Self { times, values }
    }

    /// Total number of time steps, no-data entries included.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of time steps carrying a value.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Iterate over (time, value) pairs, skipping no-data entries.
    pub fn iter_valid(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.times
            .iter()
            .zip(&self.values)
            .filter_map(|(&t, v)| v.map(|value| (t, value)))
    }
}
