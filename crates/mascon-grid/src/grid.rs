//! The core time/lat/lon grid type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mascon_common::BoundingBox;

use crate::error::{GridError, Result};

/// Longitudes may follow either the [-180, 180] or the [0, 360] convention.
const LON_MIN: f64 = -180.0;
const LON_MAX: f64 = 360.0;
const LAT_MIN: f64 = -90.0;
const LAT_MAX: f64 = 90.0;

/// An immutable time × latitude × longitude grid of mass-anomaly values.
///
/// Values are stored flat in row-major (t, y, x) order. Missing measurements
/// are marked with `fill_value`, which may be NaN. All invariants are
/// checked once in [`TimeGrid::new`]; the grid is read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<DateTime<Utc>>,
    lats: Vec<f64>,
    lons: Vec<f64>,
    values: Vec<f64>,
    fill_value: f64,
    units: String,
}

impl TimeGrid {
    /// Build a grid, validating every invariant up front.
    ///
    /// Fails with a [`GridError`] if any axis is empty, the value buffer
    /// length does not equal T·Y·X, times are not strictly increasing, or a
    /// coordinate is outside its geographic range.
    pub fn new(
        times: Vec<DateTime<Utc>>,
        lats: Vec<f64>,
        lons: Vec<f64>,
        values: Vec<f64>,
        fill_value: f64,
        units: impl Into<String>,
    ) -> Result<Self> {
        if times.is_empty() {
            return Err(GridError::EmptyAxis { axis: "time" });
        }
        if lats.is_empty() {
            return Err(GridError::EmptyAxis { axis: "lat" });
        }
        if lons.is_empty() {
            return Err(GridError::EmptyAxis { axis: "lon" });
        }

        let expected = times.len() * lats.len() * lons.len();
        if values.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }

        for (index, pair) in times.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(GridError::NonMonotonicTimes { index: index + 1 });
            }
        }

        for &lat in &lats {
            if !(LAT_MIN..=LAT_MAX).contains(&lat) {
                return Err(GridError::CoordinateOutOfRange {
                    axis: "lat",
                    value: lat,
                    min: LAT_MIN,
                    max: LAT_MAX,
                });
            }
        }
        for &lon in &lons {
            if !(LON_MIN..=LON_MAX).contains(&lon) {
                return Err(GridError::CoordinateOutOfRange {
                    axis: "lon",
                    value: lon,
                    min: LON_MIN,
                    max: LON_MAX,
                });
            }
        }

        Ok(Self {
            times,
            lats,
            lons,
            values,
            fill_value,
            units: units.into(),
        })
    }

    /// Timestamps, strictly increasing.
    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    /// Latitude coordinates of cell centers.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude coordinates of cell centers.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Sentinel marking missing measurements.
    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }

    /// Physical units of the values (e.g. "cm" of equivalent water height).
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Grid dimensions as (time, lat, lon).
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.times.len(), self.lats.len(), self.lons.len())
    }

    /// Get the value at (time, lat, lon) indices. O(1).
    ///
    /// Returns `None` when an index is out of range. The returned value may
    /// itself be the fill sentinel; use [`TimeGrid::is_missing`] to check.
    pub fn value_at(&self, t: usize, y: usize, x: usize) -> Option<f64> {
        if t >= self.times.len() || y >= self.lats.len() || x >= self.lons.len() {
            return None;
        }
        let idx = (t * self.lats.len() + y) * self.lons.len() + x;
        self.values.get(idx).copied()
    }

    /// Check whether a value is the fill sentinel (NaN-aware).
    pub fn is_missing(&self, value: f64) -> bool {
        if self.fill_value.is_nan() {
            value.is_nan()
        } else {
            value == self.fill_value || value.is_nan()
        }
    }

    /// Extent of the coordinate vectors.
    pub fn bbox(&self) -> BoundingBox {
        let (min_lat, max_lat) = min_max(&self.lats);
        let (min_lon, max_lon) = min_max(&self.lons);
        BoundingBox::new(min_lon, min_lat, max_lon, max_lat)
    }

    /// Return a new grid restricted to the coordinates inside `bbox`
    /// (edges inclusive). Longitudes are matched under both the [-180, 180]
    /// and [0, 360] conventions.
    ///
    /// Fails with [`GridError::OutOfBounds`] when the box selects no cells.
    /// Slicing a grid by its own [`TimeGrid::bbox`] returns an identical grid.
    pub fn slice_bounds(&self, bbox: &BoundingBox) -> Result<TimeGrid> {
        let y_idx: Vec<usize> = self
            .lats
            .iter()
            .enumerate()
            .filter(|(_, &lat)| lat >= bbox.min_lat && lat <= bbox.max_lat)
            .map(|(i, _)| i)
            .collect();

        let x_idx: Vec<usize> = self
            .lons
            .iter()
            .enumerate()
            .filter(|(_, &lon)| lon_in_range(lon, bbox.min_lon, bbox.max_lon))
            .map(|(i, _)| i)
            .collect();

        if y_idx.is_empty() || x_idx.is_empty() {
            return Err(GridError::OutOfBounds {
                requested: format!(
                    "[{}, {}, {}, {}]",
                    bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat
                ),
                grid: {
                    let extent = self.bbox();
                    format!(
                        "[{}, {}, {}, {}]",
                        extent.min_lon, extent.min_lat, extent.max_lon, extent.max_lat
                    )
                },
            });
        }

        tracing::debug!(
            ny = y_idx.len(),
            nx = x_idx.len(),
            "sliced grid to bounding box"
        );

        let nx_old = self.lons.len();
        let ny_old = self.lats.len();
        let mut values = Vec::with_capacity(self.times.len() * y_idx.len() * x_idx.len());
        for t in 0..self.times.len() {
            for &y in &y_idx {
                let row_base = (t * ny_old + y) * nx_old;
                for &x in &x_idx {
                    values.push(self.values[row_base + x]);
                }
            }
        }

        Ok(TimeGrid {
            times: self.times.clone(),
            lats: y_idx.iter().map(|&i| self.lats[i]).collect(),
            lons: x_idx.iter().map(|&i| self.lons[i]).collect(),
            values,
            fill_value: self.fill_value,
            units: self.units.clone(),
        })
    }
}

/// A grid longitude matches the range if it, or its ±360° alias, lies inside.
fn lon_in_range(lon: f64, min_lon: f64, max_lon: f64) -> bool {
    for candidate in [lon, lon - 360.0, lon + 360.0] {
        if candidate >= min_lon && candidate <= max_lon {
            return true;
        }
    }
    false
}

fn min_max(coords: &[f64]) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for &c in coords {
        min = min.min(c);
        max = max.max(c);
    }
    (min, max)
}

/// Serializable exchange form of a grid dataset, as read from a JSON file.
///
/// Values are flattened row-major in (t, y, x) order. Conversion into a
/// [`TimeGrid`] runs the full invariant validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeGridData {
    pub times: Vec<DateTime<Utc>>,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub values: Vec<f64>,
    pub fill_value: f64,
    #[serde(default)]
    pub units: String,
}

impl TryFrom<TimeGridData> for TimeGrid {
    type Error = GridError;

    fn try_from(data: TimeGridData) -> Result<TimeGrid> {
        TimeGrid::new(
            data.times,
            data.lats,
            data.lons,
            data.values,
            data.fill_value,
            data.units,
        )
    }
}

impl From<&TimeGrid> for TimeGridData {
    fn from(grid: &TimeGrid) -> TimeGridData {
        TimeGridData {
            times: grid.times.clone(),
            lats: grid.lats.clone(),
            lons: grid.lons.clone(),
            values: grid.values.clone(),
            fill_value: grid.fill_value,
            units: grid.units.clone(),
        }
    }
}
