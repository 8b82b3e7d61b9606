//! Polygon region geometry and point-in-polygon classification.

use mascon_common::BoundingBox;

use crate::error::{RegionError, Result};

const LON_MIN: f64 = -180.0;
const LON_MAX: f64 = 360.0;
const LAT_MIN: f64 = -90.0;
const LAT_MAX: f64 = 90.0;

/// Tolerance for the on-boundary test, in degrees. Grid cell centers sit
/// well away from ring edges at this scale unless they coincide exactly.
const EDGE_EPSILON: f64 = 1e-9;

/// A simple closed ring of (lon, lat) vertices, stored in open form (no
/// duplicated closing vertex).
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<(f64, f64)>,
}

impl Ring {
    /// Build a ring from (lon, lat) vertices.
    ///
    /// A trailing vertex equal to the first is accepted and dropped. Fails
    /// if fewer than 3 distinct vertices remain or a coordinate is outside
    /// its geographic range.
    pub fn new(mut vertices: Vec<(f64, f64)>) -> Result<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        for &(lon, lat) in &vertices {
            if !(LON_MIN..=LON_MAX).contains(&lon) {
                return Err(RegionError::CoordinateOutOfRange {
                    axis: "lon",
                    value: lon,
                    min: LON_MIN,
                    max: LON_MAX,
                });
            }
            if !(LAT_MIN..=LAT_MAX).contains(&lat) {
                return Err(RegionError::CoordinateOutOfRange {
                    axis: "lat",
                    value: lat,
                    min: LAT_MIN,
                    max: LAT_MAX,
                });
            }
        }

        let mut distinct = vertices.clone();
        // Coordinates passed the range check above, so they are comparable.
        distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        distinct.dedup();
        if distinct.len() < 3 {
            return Err(RegionError::DegenerateRing {
                distinct: distinct.len(),
            });
        }

        Ok(Self { vertices })
    }

    /// Vertices in open form.
    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    /// Check if a point is inside this ring, boundary included.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.on_boundary(lon, lat) || self.contains_interior(lon, lat)
    }

    /// Even-odd ray casting, exclusive of the boundary's exact behavior.
    pub fn contains_interior(&self, lon: f64, lat: f64) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;

        for i in 0..n {
            let (xi, yi) = self.vertices[i];
            let (xj, yj) = self.vertices[j];

            if ((yi > lat) != (yj > lat)) && (lon < (xj - xi) * (lat - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// Check if a point lies exactly on one of the ring's edges.
    pub fn on_boundary(&self, lon: f64, lat: f64) -> bool {
        let n = self.vertices.len();
        let mut j = n - 1;

        for i in 0..n {
            let (xi, yi) = self.vertices[i];
            let (xj, yj) = self.vertices[j];

            let cross = (xj - xi) * (lat - yi) - (yj - yi) * (lon - xi);
            if cross.abs() <= EDGE_EPSILON
                && lon >= xi.min(xj) - EDGE_EPSILON
                && lon <= xi.max(xj) + EDGE_EPSILON
                && lat >= yi.min(yj) - EDGE_EPSILON
                && lat <= yi.max(yj) + EDGE_EPSILON
            {
                return true;
            }
            j = i;
        }

        false
    }

    /// Bounding box of the ring's vertices.
    pub fn bbox(&self) -> BoundingBox {
        let mut min_lon = f64::MAX;
        let mut min_lat = f64::MAX;
        let mut max_lon = f64::MIN;
        let mut max_lat = f64::MIN;

        for &(lon, lat) in &self.vertices {
            min_lon = min_lon.min(lon);
            max_lon = max_lon.max(lon);
            min_lat = min_lat.min(lat);
            max_lat = max_lat.max(lat);
        }

        BoundingBox::new(min_lon, min_lat, max_lon, max_lat)
    }
}

/// A polygon: one exterior ring plus zero or more hole rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    /// A point is in the polygon if it is inside the exterior ring and not
    /// strictly inside any hole. Points on a hole's boundary still count as
    /// in the polygon.
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        if !self.exterior.contains(lon, lat) {
            return false;
        }

        for hole in &self.holes {
            if hole.contains_interior(lon, lat) && !hole.on_boundary(lon, lat) {
                return false;
            }
        }

        true
    }

    /// Bounding box of the exterior ring.
    pub fn bbox(&self) -> BoundingBox {
        self.exterior.bbox()
    }
}

/// A geographic region: zero or more polygons, possibly disjoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    polygons: Vec<Polygon>,
}

impl Region {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// A region with no polygons. Contains nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// A point is in the region if any constituent polygon contains it.
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        self.polygons.iter().any(|p| p.contains_point(lon, lat))
    }

    /// Bounding box covering all polygons, or `None` for an empty region.
    pub fn bbox(&self) -> Option<BoundingBox> {
        let mut boxes = self.polygons.iter().map(Polygon::bbox);
        let first = boxes.next()?;
        Some(boxes.fold(first, |acc, b| {
            BoundingBox::new(
                acc.min_lon.min(b.min_lon),
                acc.min_lat.min(b.min_lat),
                acc.max_lon.max(b.max_lon),
                acc.max_lat.max(b.max_lat),
            )
        }))
    }
}
