//! Error types for grid storage and slicing.

use thiserror::Error;

/// Errors that can occur when constructing or slicing a grid.
#[derive(Error, Debug)]
pub enum GridError {
    /// A coordinate axis has no points.
    #[error("empty {axis} axis: a grid needs at least one point per axis")]
    EmptyAxis { axis: &'static str },

    /// The flat value buffer does not match the coordinate dimensions.
    #[error("values length {actual} does not match time × lat × lon = {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Timestamps are not strictly increasing.
    #[error("times must be strictly increasing (violation at index {index})")]
    NonMonotonicTimes { index: usize },

    /// A latitude or longitude is outside its valid geographic range.
    #[error("{axis} coordinate {value} outside valid range [{min}, {max}]")]
    CoordinateOutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The requested bounding box selects no grid cells.
    #[error("requested bbox {requested} does not intersect grid extent {grid}")]
    OutOfBounds { requested: String, grid: String },
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
