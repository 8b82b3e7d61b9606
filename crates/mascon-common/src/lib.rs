//! Common types shared across the mascon-trend crates.

pub mod bbox;
pub mod time;

pub use bbox::BoundingBox;
pub use time::{days_between, parse_iso8601, TimeParseError, TimeRange};
