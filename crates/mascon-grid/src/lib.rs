//! In-memory storage for gridded mass-anomaly time series.
//!
//! A [`TimeGrid`] holds a time × latitude × longitude block of values plus
//! its coordinate vectors, validated once at construction and read-only
//! afterwards. Spatial subsetting happens through [`TimeGrid::slice_bounds`];
//! everything downstream (masking, aggregation, trend fitting) lives in the
//! `region-mask` and `trend-analysis` crates.

pub mod error;
pub mod grid;
pub mod testdata;

pub use error::{GridError, Result};
pub use grid::{TimeGrid, TimeGridData};
