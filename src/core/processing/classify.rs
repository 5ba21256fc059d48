//! Threshold classification: composite raster to boolean mask.

use ndarray::Array2;

use crate::core::raster::{Mask, Raster};

/// Mask pixels whose composite value is strictly greater than `threshold`.
///
/// Undefined (NaN) composite pixels classify as `false`; the mask carries
/// no third state. Pure function of the composite and the threshold, and
/// monotonic: raising the threshold never adds mask pixels.
pub fn threshold_mask(composite: &Raster, threshold: f64) -> Mask {
    let data: Array2<bool> = composite.data().mapv(|v| !v.is_nan() && v > threshold);
    // Shapes agree by construction
    Mask::from_parts(composite.grid.clone(), data)
        .expect("mask inherits the composite grid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::{Crs, GeoTransform, Grid};
    use ndarray::Array2;

    fn raster(values: &[f64], rows: usize, cols: usize) -> Raster {
        let grid = Grid::new(
            rows,
            cols,
            GeoTransform::new(0.0, rows as f64, 1.0, -1.0),
            Crs::from_name("EPSG:32633"),
        );
        Raster::from_parts(grid, Array2::from_shape_vec((rows, cols), values.to_vec()).unwrap())
            .unwrap()
    }

    #[test]
    fn strictly_greater_than() {
        let composite = raster(&[0.2, 0.3, 0.4, f64::NAN], 2, 2);
        let mask = threshold_mask(&composite, 0.3);
        assert!(!mask.get(0, 0));
        assert!(!mask.get(0, 1)); // equal is not greater
        assert!(mask.get(1, 0));
        assert!(!mask.get(1, 1)); // undefined classifies as false
    }

    #[test]
    fn monotonic_in_threshold() {
        let values: Vec<f64> = (0..25).map(|i| -1.0 + i as f64 * 0.08).collect();
        let composite = raster(&values, 5, 5);

        let mut previous = usize::MAX;
        for threshold in [-1.0, -0.5, 0.0, 0.25, 0.5, 0.9] {
            let count = threshold_mask(&composite, threshold).count_true();
            assert!(
                count <= previous,
                "raising threshold to {} increased mask count",
                threshold
            );
            previous = count;
        }
    }

    #[test]
    fn mask_grid_matches_composite() {
        let composite = raster(&[0.5; 6], 2, 3);
        let mask = threshold_mask(&composite, 0.0);
        assert_eq!(mask.grid.shape(), (2, 3));
        assert_eq!(mask.count_true(), 6);
    }
}
