//! Error types for region geometry and GeoJSON parsing.

use thiserror::Error;

/// Errors that can occur when building a region.
#[derive(Error, Debug)]
pub enum RegionError {
    /// The GeoJSON document is malformed or of an unsupported type.
    #[error("invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    /// A ring has fewer than 3 distinct vertices.
    #[error("degenerate ring: {distinct} distinct vertices, need at least 3")]
    DegenerateRing { distinct: usize },

    /// A vertex coordinate is outside its valid geographic range.
    #[error("{axis} coordinate {value} outside valid range [{min}, {max}]")]
    CoordinateOutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl From<serde_json::Error> for RegionError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidGeoJson(err.to_string())
    }
}

/// Result type for region operations.
pub type Result<T> = std::result::Result<T, RegionError>;
