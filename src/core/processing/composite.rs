//! Temporal compositing: reduce a stack of index rasters sharing one grid
//! into a single raster, per pixel, ignoring undefined values.
//!
//! Grid alignment is a precondition. Mismatched stacks are rejected with
//! an error; resampling onto a common grid is the caller's explicit
//! responsibility and happens before this stage.

use ndarray::Array2;

use crate::core::raster::Raster;
use crate::error::{Error, Result};
use crate::types::CompositeMethod;

/// Reduce `stack` per pixel with `method`.
///
/// Undefined (NaN) values are skipped at each pixel; a pixel undefined in
/// every input stays undefined in the output. An empty stack is an
/// [`Error::EmptyInput`]; a grid mismatch is an [`Error::GridMismatch`].
pub fn composite(stack: Vec<Raster>, method: CompositeMethod) -> Result<Raster> {
    let first = match stack.first() {
        Some(first) => first.grid.clone(),
        None => return Err(Error::EmptyInput),
    };

    for raster in &stack {
        if !raster.grid.aligns_with(&first) {
            return Err(Error::GridMismatch {
                expected: first.describe(),
                actual: raster.grid.describe(),
            });
        }
    }

    let (rows, cols) = first.shape();
    let mut out = Array2::from_elem((rows, cols), f64::NAN);
    let mut values: Vec<f64> = Vec::with_capacity(stack.len());

    for row in 0..rows {
        for col in 0..cols {
            values.clear();
            values.extend(
                stack
                    .iter()
                    .map(|r| r.get(row, col))
                    .filter(|v| !v.is_nan()),
            );
            if values.is_empty() {
                continue;
            }
            out[[row, col]] = reduce(&mut values, method);
        }
    }

    Raster::from_parts(first, out)
}

fn reduce(values: &mut [f64], method: CompositeMethod) -> f64 {
    match method {
        CompositeMethod::Median => median(values),
        CompositeMethod::Mean => values.iter().sum::<f64>() / values.len() as f64,
        CompositeMethod::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        CompositeMethod::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 0 {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    } else {
        values[n / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::{Crs, GeoTransform, Grid};
    use approx::assert_relative_eq;

    fn grid(rows: usize, cols: usize) -> Grid {
        Grid::new(
            rows,
            cols,
            GeoTransform::new(0.0, rows as f64 * 10.0, 10.0, -10.0),
            Crs::from_name("EPSG:32633"),
        )
    }

    fn raster(rows: usize, cols: usize, values: &[f64]) -> Raster {
        let data = Array2::from_shape_vec((rows, cols), values.to_vec()).unwrap();
        Raster::from_parts(grid(rows, cols), data).unwrap()
    }

    #[test]
    fn empty_stack_is_an_error() {
        assert!(matches!(
            composite(Vec::new(), CompositeMethod::Median),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn grid_mismatch_is_an_error() {
        let a = raster(2, 2, &[0.1, 0.2, 0.3, 0.4]);
        let b = raster(2, 3, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        assert!(matches!(
            composite(vec![a, b], CompositeMethod::Median),
            Err(Error::GridMismatch { .. })
        ));
    }

    #[test]
    fn shifted_origin_is_a_mismatch() {
        let a = raster(2, 2, &[0.1, 0.2, 0.3, 0.4]);
        let shifted_grid = Grid::new(
            2,
            2,
            GeoTransform::new(5.0, 20.0, 10.0, -10.0),
            Crs::from_name("EPSG:32633"),
        );
        let b = Raster::from_parts(
            shifted_grid,
            Array2::from_shape_vec((2, 2), vec![0.1, 0.2, 0.3, 0.4]).unwrap(),
        )
        .unwrap();
        assert!(matches!(
            composite(vec![a, b], CompositeMethod::Median),
            Err(Error::GridMismatch { .. })
        ));
    }

    #[test]
    fn output_dimensions_match_input() {
        let a = raster(3, 4, &[0.0; 12]);
        let b = raster(3, 4, &[0.5; 12]);
        let out = composite(vec![a, b], CompositeMethod::Median).unwrap();
        assert_eq!(out.grid.shape(), (3, 4));
    }

    #[test]
    fn median_odd_and_even_counts() {
        let a = raster(1, 1, &[0.2]);
        let b = raster(1, 1, &[0.6]);
        let c = raster(1, 1, &[0.4]);
        let out = composite(vec![a.clone(), b.clone(), c], CompositeMethod::Median).unwrap();
        assert_relative_eq!(out.get(0, 0), 0.4, epsilon = 1e-12);

        let out = composite(vec![a, b], CompositeMethod::Median).unwrap();
        assert_relative_eq!(out.get(0, 0), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn median_ignores_undefined_values() {
        let a = raster(1, 1, &[f64::NAN]);
        let b = raster(1, 1, &[0.8]);
        let c = raster(1, 1, &[0.2]);
        let out = composite(vec![a, b, c], CompositeMethod::Median).unwrap();
        assert_relative_eq!(out.get(0, 0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn all_undefined_pixel_stays_undefined() {
        let a = raster(1, 2, &[f64::NAN, 0.1]);
        let b = raster(1, 2, &[f64::NAN, 0.3]);
        let out = composite(vec![a, b], CompositeMethod::Median).unwrap();
        assert!(out.get(0, 0).is_nan());
        assert_relative_eq!(out.get(0, 1), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn mean_min_max() {
        let a = raster(1, 1, &[0.1]);
        let b = raster(1, 1, &[0.5]);
        let c = raster(1, 1, &[0.3]);

        let mean = composite(vec![a.clone(), b.clone(), c.clone()], CompositeMethod::Mean).unwrap();
        assert_relative_eq!(mean.get(0, 0), 0.3, epsilon = 1e-12);

        let min = composite(vec![a.clone(), b.clone(), c.clone()], CompositeMethod::Min).unwrap();
        assert_relative_eq!(min.get(0, 0), 0.1, epsilon = 1e-12);

        let max = composite(vec![a, b, c], CompositeMethod::Max).unwrap();
        assert_relative_eq!(max.get(0, 0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn single_raster_composites_to_itself() {
        let a = raster(2, 2, &[0.1, f64::NAN, 0.3, 0.4]);
        let out = composite(vec![a], CompositeMethod::Median).unwrap();
        assert_relative_eq!(out.get(0, 0), 0.1, epsilon = 1e-12);
        assert!(out.get(0, 1).is_nan());
    }
}
