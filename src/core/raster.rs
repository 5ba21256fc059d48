//! Raster containers: a float raster with NaN-encoded undefined pixels,
//! and the boolean mask produced by classification.

use ndarray::Array2;

use crate::core::grid::Grid;
use crate::error::{Error, Result};

/// A single-band float raster bound to a [`Grid`]. Undefined pixels are
/// encoded as NaN. Index rasters and temporal composites both use this
/// container; buffers are moved, not shared, between pipeline stages.
#[derive(Debug, Clone)]
pub struct Raster {
    pub grid: Grid,
    data: Array2<f64>,
}

impl Raster {
    /// Bind `data` to `grid`, checking that the dimensions agree.
    pub fn from_parts(grid: Grid, data: Array2<f64>) -> Result<Self> {
        let (rows, cols) = data.dim();
        if (rows, cols) != grid.shape() {
            return Err(Error::DimensionMismatch {
                expected_rows: grid.rows,
                expected_cols: grid.cols,
                actual_rows: rows,
                actual_cols: cols,
            });
        }
        Ok(Self { grid, data })
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_data(self) -> Array2<f64> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    /// Count of pixels holding a defined (non-NaN) value.
    pub fn defined_count(&self) -> usize {
        self.data.iter().filter(|v| !v.is_nan()).count()
    }
}

/// Boolean mask over a [`Grid`], produced by thresholding a composite.
#[derive(Debug, Clone)]
pub struct Mask {
    pub grid: Grid,
    data: Array2<bool>,
}

impl Mask {
    pub fn from_parts(grid: Grid, data: Array2<bool>) -> Result<Self> {
        let (rows, cols) = data.dim();
        if (rows, cols) != grid.shape() {
            return Err(Error::DimensionMismatch {
                expected_rows: grid.rows,
                expected_cols: grid.cols,
                actual_rows: rows,
                actual_cols: cols,
            });
        }
        Ok(Self { grid, data })
    }

    pub fn data(&self) -> &Array2<bool> {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[[row, col]]
    }

    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}
