//! Error types for aggregation and trend fitting.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during aggregation or trend fitting.
///
/// All of these reflect bad input or a configuration mismatch; none are
/// retried, and all are detected before any partial result is produced.
#[derive(Error, Debug)]
pub enum TrendError {
    /// The mask selects no cells anywhere in the grid. The region and the
    /// grid do not overlap at all, which is a setup problem rather than a
    /// per-time-step data gap.
    #[error("region mask selects no grid cells: region and grid do not overlap")]
    EmptyMask,

    /// Mask dimensions do not match the grid's spatial dimensions.
    #[error("mask shape {mask_ny}×{mask_nx} does not match grid shape {grid_ny}×{grid_nx}")]
    ShapeMismatch {
        grid_ny: usize,
        grid_nx: usize,
        mask_ny: usize,
        mask_nx: usize,
    },

    /// Fewer than 2 valid samples in the selected date range.
    #[error("insufficient data: {found} valid sample(s) in range, need at least 2 to fit a line")]
    InsufficientData { found: usize },

    /// The selected range has start after end.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Result type for trend-analysis operations.
pub type Result<T> = std::result::Result<T, TrendError>;
