//! Spatial reduction of a masked grid to a time series.

use serde::{Deserialize, Serialize};

use mascon_grid::TimeGrid;
use region_mask::RegionMask;

use crate::error::{Result, TrendError};
use crate::series::TimeSeries;

/// Cell weighting scheme for the spatial mean.
///
/// `Uniform` is the plain arithmetic mean over in-region cells. `Area`
/// weights each cell by the cosine of its latitude, compensating for
/// lat/lon cells shrinking toward the poles. For regions spanning only a
/// few degrees of latitude the two are nearly identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    #[default]
    Uniform,
    Area,
}

impl Weighting {
    fn cell_weight(&self, lat: f64) -> f64 {
        match self {
            Weighting::Uniform => 1.0,
            Weighting::Area => lat.to_radians().cos(),
        }
    }
}

impl std::str::FromStr for Weighting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uniform" => Ok(Weighting::Uniform),
            "area" => Ok(Weighting::Area),
            other => Err(format!(
                "unknown weighting '{other}', expected 'uniform' or 'area'"
            )),
        }
    }
}

impl std::fmt::Display for Weighting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weighting::Uniform => write!(f, "uniform"),
            Weighting::Area => write!(f, "area"),
        }
    }
}

/// Reduce the masked grid to one scalar per time step.
///
/// Fill cells are excluded from both numerator and denominator. A time step
/// where every in-region cell is fill gets a `None` entry, never zero.
///
/// Fails with [`TrendError::EmptyMask`] when the mask selects no cells at
/// all (a structural mismatch, checked before any time step is reduced),
/// and with [`TrendError::ShapeMismatch`] when the mask was built for a
/// different grid shape.
pub fn aggregate(grid: &TimeGrid, mask: &RegionMask, weighting: Weighting) -> Result<TimeSeries> {
    let (nt, ny, nx) = grid.shape();

    if mask.ny() != ny || mask.nx() != nx {
        return Err(TrendError::ShapeMismatch {
            grid_ny: ny,
            grid_nx: nx,
            mask_ny: mask.ny(),
            mask_nx: mask.nx(),
        });
    }
    if mask.count() == 0 {
        return Err(TrendError::EmptyMask);
    }

    let mut values = Vec::with_capacity(nt);
    for t in 0..nt {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for y in 0..ny {
            let weight = weighting.cell_weight(grid.lats()[y]);
            for x in 0..nx {
                if !mask.get(y, x) {
                    continue;
                }
                match grid.value_at(t, y, x) {
                    Some(value) if !grid.is_missing(value) => {
                        weighted_sum += weight * value;
                        weight_total += weight;
                    }
                    _ => {}
                }
            }
        }

        values.push(if weight_total > 0.0 {
            Some(weighted_sum / weight_total)
        } else {
            None
        });
    }

    let series = TimeSeries::new(grid.times().to_vec(), values);
    tracing::debug!(
        steps = series.len(),
        valid = series.valid_count(),
        %weighting,
        "aggregated masked grid to time series"
    );
    Ok(series)
}
