//! Region mask construction over grid coordinate vectors.

use crate::region::Region;

/// A boolean grid marking which cells fall inside a region.
///
/// Row-major, shape (ny, nx), aligned to the lat/lon axes it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMask {
    inside: Vec<bool>,
    ny: usize,
    nx: usize,
}

impl RegionMask {
    /// Whether the cell at (lat index, lon index) is in the region.
    /// Out-of-range indices are outside.
    pub fn get(&self, y: usize, x: usize) -> bool {
        if y >= self.ny || x >= self.nx {
            return false;
        }
        self.inside[y * self.nx + x]
    }

    /// Number of in-region cells.
    pub fn count(&self) -> usize {
        self.inside.iter().filter(|&&b| b).count()
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn nx(&self) -> usize {
        self.nx
    }
}

/// Classify every grid cell center against the region.
///
/// Pure function of its inputs. An empty region, or one wholly disjoint
/// from the grid, yields an all-false mask; whether that is an error is the
/// aggregation layer's call. Each cell is also tested with its longitude
/// shifted by ±360° so regions and grids may use either longitude
/// convention.
pub fn build_mask(lats: &[f64], lons: &[f64], region: &Region) -> RegionMask {
    let ny = lats.len();
    let nx = lons.len();
    let mut inside = vec![false; ny * nx];

    if !region.is_empty() {
        for (y, &lat) in lats.iter().enumerate() {
            for (x, &lon) in lons.iter().enumerate() {
                let hit = region.contains_point(lon, lat)
                    || region.contains_point(lon - 360.0, lat)
                    || region.contains_point(lon + 360.0, lat);
                inside[y * nx + x] = hit;
            }
        }
    }

    let mask = RegionMask { inside, ny, nx };
    tracing::debug!(
        cells = ny * nx,
        in_region = mask.count(),
        "built region mask"
    );
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Polygon, Region, Ring};

    fn axis(n: usize) -> Vec<f64> {
        (0..n).map(|i| 10.0 * i as f64).collect()
    }

    fn square(min: f64, max: f64) -> Polygon {
        Polygon::new(
            Ring::new(vec![(min, min), (max, min), (max, max), (min, max)]).unwrap(),
            vec![],
        )
    }

    #[test]
    fn test_mask_marks_interior_cells() {
        // Cell centers at 0, 10, 20, 30 on both axes; region covers 5..25.
        let region = Region::new(vec![square(5.0, 25.0)]);
        let mask = build_mask(&axis(4), &axis(4), &region);

        assert_eq!(mask.count(), 4);
        assert!(mask.get(1, 1));
        assert!(mask.get(2, 2));
        assert!(!mask.get(0, 0));
        assert!(!mask.get(3, 3));
    }

    #[test]
    fn test_mask_empty_region_all_false() {
        let mask = build_mask(&axis(3), &axis(3), &Region::empty());
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn test_mask_disjoint_region_all_false() {
        let region = Region::new(vec![square(50.0, 70.0)]);
        let mask = build_mask(&axis(3), &axis(3), &region);
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn test_mask_invariant_to_polygon_order() {
        let a = square(5.0, 25.0);
        let b = square(-5.0, 8.0);
        let forward = build_mask(&axis(4), &axis(4), &Region::new(vec![a.clone(), b.clone()]));
        let reversed = build_mask(&axis(4), &axis(4), &Region::new(vec![b, a]));
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_mask_boundary_cell_included() {
        // Region edge passes exactly through the cell center at (10, 10).
        let region = Region::new(vec![square(10.0, 25.0)]);
        let mask = build_mask(&axis(4), &axis(4), &region);
        assert!(mask.get(1, 1));
    }

    #[test]
    fn test_mask_antimeridian_region() {
        // Region expressed in [-180, 180], grid longitudes in [0, 360].
        let region = Region::new(vec![square(-15.0, 15.0)]);
        let lons = vec![0.0, 90.0, 180.0, 270.0, 350.0];
        let lats = vec![0.0, 5.0];
        let mask = build_mask(&lats, &lons, &region);

        assert!(mask.get(0, 0)); // 0°E
        assert!(mask.get(0, 4)); // 350°E == -10°E
        assert!(!mask.get(0, 1)); // 90°E
        assert!(!mask.get(0, 2)); // 180°E
    }

    #[test]
    fn test_mask_out_of_range_get_is_false() {
        let region = Region::new(vec![square(-5.0, 35.0)]);
        let mask = build_mask(&axis(2), &axis(2), &region);
        assert!(mask.get(0, 0));
        assert!(!mask.get(5, 0));
        assert!(!mask.get(0, 5));
    }
}
