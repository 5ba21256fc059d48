//! Band algebra: normalized difference indices.
//!
//! `NDVI = (NIR - Red) / (NIR + Red)`, in [-1, 1] where defined. Pixels
//! where the band sum is zero, or where either input is undefined, are set
//! to NaN rather than raising a division fault.

use ndarray::{Array2, Zip};

use crate::core::grid::Grid;
use crate::core::raster::Raster;
use crate::error::{Error, Result};

/// Band sums smaller than this are treated as zero.
const ZERO_SUM_EPS: f64 = 1e-10;

/// Per-pixel normalized difference `(a - b) / (a + b)`.
///
/// Pure function over two equally-shaped arrays. Output pixels are NaN
/// where either input is NaN or where `|a + b|` is below epsilon.
pub fn normalized_difference(a: &Array2<f64>, b: &Array2<f64>) -> Result<Array2<f64>> {
    let (rows, cols) = a.dim();
    let (b_rows, b_cols) = b.dim();
    if (rows, cols) != (b_rows, b_cols) {
        return Err(Error::DimensionMismatch {
            expected_rows: rows,
            expected_cols: cols,
            actual_rows: b_rows,
            actual_cols: b_cols,
        });
    }

    let mut result = Array2::from_elem((rows, cols), f64::NAN);
    Zip::from(a).and(b).and(&mut result).for_each(|&av, &bv, res| {
        if av.is_nan() || bv.is_nan() {
            return;
        }
        let sum = av + bv;
        if sum.abs() < ZERO_SUM_EPS {
            return;
        }
        *res = (av - bv) / sum;
    });
    Ok(result)
}

/// NDVI over a scene's NIR and Red bands, bound to the scene grid.
/// Band buffers are consumed; the index raster owns its output buffer.
pub fn scene_ndvi(grid: Grid, nir: Array2<f64>, red: Array2<f64>) -> Result<Raster> {
    let data = normalized_difference(&nir, &red)?;
    Raster::from_parts(grid, data)
}
