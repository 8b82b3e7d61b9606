//! Geographic regions and grid cell masks.
//!
//! A [`Region`] is a set of polygons (with optional holes) loaded from
//! GeoJSON. [`build_mask`] classifies every cell center of a lat/lon grid
//! against the region, producing a [`RegionMask`] aligned to the grid axes.
//!
//! Boundary tie-break: points exactly on a ring boundary are treated as
//! inside the region, for exterior and hole rings alike.

pub mod error;
pub mod geojson;
pub mod mask;
pub mod region;

pub use error::{RegionError, Result};
pub use mask::{build_mask, RegionMask};
pub use region::{Polygon, Region, Ring};
