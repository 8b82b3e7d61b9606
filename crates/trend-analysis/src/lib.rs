//! Spatial aggregation and linear trend estimation for masked grids.
//!
//! The pipeline is: build a [`region_mask::RegionMask`] over a
//! [`mascon_grid::TimeGrid`], reduce the in-region cells to one scalar per
//! time step with [`aggregate`], then fit an ordinary least-squares line
//! over a date sub-range with [`fit_trend`]. [`region_trend`] runs all three
//! steps in one call.
//!
//! Everything here is synchronous, deterministic, and side-effect free:
//! identical inputs produce bit-identical results.

pub mod aggregate;
pub mod error;
pub mod series;
pub mod trend;

pub use aggregate::{aggregate, Weighting};
pub use error::{Result, TrendError};
pub use series::TimeSeries;
pub use trend::{fit_trend, region_trend, TrendResult};
