//! GeoJSON loading for regions.
//!
//! Supports `Polygon`, `MultiPolygon`, `GeometryCollection`, `Feature`, and
//! `FeatureCollection` documents (RFC 7946). Per the GeoJSON convention the
//! first ring of a polygon is the exterior and any further rings are holes.
//! Extra coordinate dimensions (elevation) are ignored.

use serde_json::Value;

use crate::error::{RegionError, Result};
use crate::region::{Polygon, Region, Ring};

impl Region {
    /// Parse a region from a GeoJSON document string.
    pub fn from_geojson_str(s: &str) -> Result<Region> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_geojson_value(&value)
    }

    /// Parse a region from an already-parsed GeoJSON value.
    ///
    /// Multiple geometries (in a `MultiPolygon`, `GeometryCollection`, or
    /// `FeatureCollection`) are unioned into one region.
    pub fn from_geojson_value(value: &Value) -> Result<Region> {
        let mut polygons = Vec::new();
        collect_polygons(value, &mut polygons)?;

        tracing::debug!(polygons = polygons.len(), "parsed GeoJSON region");
        Ok(Region::new(polygons))
    }
}

fn collect_polygons(value: &Value, out: &mut Vec<Polygon>) -> Result<()> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| RegionError::InvalidGeoJson("missing \"type\" member".to_string()))?;

    match kind {
        "Polygon" => {
            out.push(parse_polygon(coordinates_of(value)?)?);
            Ok(())
        }
        "MultiPolygon" => {
            let coords = coordinates_of(value)?;
            let polys = coords.as_array().ok_or_else(|| {
                RegionError::InvalidGeoJson("MultiPolygon coordinates must be an array".to_string())
            })?;
            for poly in polys {
                out.push(parse_polygon(poly)?);
            }
            Ok(())
        }
        "GeometryCollection" => {
            let geometries = value
                .get("geometries")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    RegionError::InvalidGeoJson(
                        "GeometryCollection missing \"geometries\"".to_string(),
                    )
                })?;
            for geometry in geometries {
                collect_polygons(geometry, out)?;
            }
            Ok(())
        }
        "Feature" => {
            let geometry = value.get("geometry").ok_or_else(|| {
                RegionError::InvalidGeoJson("Feature missing \"geometry\"".to_string())
            })?;
            if geometry.is_null() {
                return Ok(());
            }
            collect_polygons(geometry, out)
        }
        "FeatureCollection" => {
            let features = value
                .get("features")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    RegionError::InvalidGeoJson(
                        "FeatureCollection missing \"features\"".to_string(),
                    )
                })?;
            for feature in features {
                collect_polygons(feature, out)?;
            }
            Ok(())
        }
        other => Err(RegionError::InvalidGeoJson(format!(
            "unsupported GeoJSON type \"{other}\", expected Polygon or MultiPolygon"
        ))),
    }
}

fn coordinates_of(value: &Value) -> Result<&Value> {
    value.get("coordinates").ok_or_else(|| {
        RegionError::InvalidGeoJson("geometry missing \"coordinates\"".to_string())
    })
}

/// Parse one polygon's coordinate array: `[exterior, hole, hole, ...]`.
fn parse_polygon(coords: &Value) -> Result<Polygon> {
    let rings = coords.as_array().ok_or_else(|| {
        RegionError::InvalidGeoJson("Polygon coordinates must be an array of rings".to_string())
    })?;

    let mut parsed = rings.iter().map(parse_ring);
    let exterior = parsed
        .next()
        .ok_or_else(|| RegionError::InvalidGeoJson("Polygon has no rings".to_string()))??;
    let holes = parsed.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, holes))
}

fn parse_ring(ring: &Value) -> Result<Ring> {
    let positions = ring.as_array().ok_or_else(|| {
        RegionError::InvalidGeoJson("ring must be an array of positions".to_string())
    })?;

    let vertices = positions
        .iter()
        .map(parse_position)
        .collect::<Result<Vec<_>>>()?;

    Ring::new(vertices)
}

fn parse_position(position: &Value) -> Result<(f64, f64)> {
    let parts = position.as_array().ok_or_else(|| {
        RegionError::InvalidGeoJson("position must be an array of numbers".to_string())
    })?;
    if parts.len() < 2 {
        return Err(RegionError::InvalidGeoJson(
            "position needs at least [lon, lat]".to_string(),
        ));
    }

    let lon = parts[0]
        .as_f64()
        .ok_or_else(|| RegionError::InvalidGeoJson("longitude is not a number".to_string()))?;
    let lat = parts[1]
        .as_f64()
        .ok_or_else(|| RegionError::InvalidGeoJson("latitude is not a number".to_string()))?;

    Ok((lon, lat))
}
