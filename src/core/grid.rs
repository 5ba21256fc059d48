//! Grid geometry: affine geotransform, CRS tagging, and alignment checks.
//!
//! Every raster in the pipeline carries a [`Grid`]. Pixel-wise operations
//! (compositing, classification, aggregation) require identical grids;
//! alignment is checked, never silently fixed by resampling.

use serde::{Deserialize, Serialize};

use crate::types::CrsKind;

/// Affine transformation between pixel coordinates (col, row) and
/// geographic coordinates (x, y):
///
/// ```text
/// x = origin_x + col * pixel_width + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// For north-up images the rotation terms are 0 and `pixel_height` is
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
    pub row_rotation: f64,
    pub col_rotation: f64,
}

impl GeoTransform {
    /// North-up transform with no rotation.
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    /// Build from a GDAL-style coefficient array
    /// `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`.
    pub fn from_coeffs(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            col_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    /// Convert to the GDAL-style coefficient array.
    pub fn to_coeffs(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }

    /// Geographic coordinates of the center of pixel (row, col).
    pub fn pixel_center(&self, row: usize, col: usize) -> (f64, f64) {
        let col_f = col as f64 + 0.5;
        let row_f = row as f64 + 0.5;
        let x = self.origin_x + col_f * self.pixel_width + row_f * self.row_rotation;
        let y = self.origin_y + col_f * self.col_rotation + row_f * self.pixel_height;
        (x, y)
    }

    /// Coefficient-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &GeoTransform, eps: f64) -> bool {
        self.to_coeffs()
            .iter()
            .zip(other.to_coeffs().iter())
            .all(|(a, b)| (a - b).abs() < eps)
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

/// Coordinate reference system: a name (e.g. `EPSG:32633`) plus the
/// projected/geographic family tag derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crs {
    pub name: String,
    pub kind: CrsKind,
}

impl Crs {
    /// Classify a CRS identifier. Well-known geographic systems map to
    /// [`CrsKind::Geographic`]; anything else is treated as projected
    /// with meter-sized pixels.
    pub fn from_name(name: &str) -> Self {
        let upper = name.trim().to_ascii_uppercase();
        let kind = match upper.as_str() {
            "EPSG:4326" | "EPSG:4269" | "EPSG:4267" | "CRS84" | "OGC:CRS84" | "WGS84" => {
                CrsKind::Geographic
            }
            _ => CrsKind::Projected,
        };
        Self { name: upper, kind }
    }
}

/// Raster grid: dimensions, geotransform, and CRS. Two rasters may be
/// combined pixel-wise only when their grids align.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub transform: GeoTransform,
    pub crs: Crs,
}

/// Tolerance for geotransform coefficient comparisons.
const ALIGN_EPS: f64 = 1e-9;

impl Grid {
    pub fn new(rows: usize, cols: usize, transform: GeoTransform, crs: Crs) -> Self {
        Self {
            rows,
            cols,
            transform,
            crs,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `other` shares dimensions, geotransform (within epsilon),
    /// and CRS. Required before any pixel-wise combination.
    pub fn aligns_with(&self, other: &Grid) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.crs == other.crs
            && self.transform.approx_eq(&other.transform, ALIGN_EPS)
    }

    /// Compact description used in mismatch errors.
    pub fn describe(&self) -> String {
        let t = &self.transform;
        format!(
            "{}x{} @({}, {}) px({}, {}) {}",
            self.rows, self.cols, t.origin_x, t.origin_y, t.pixel_width, t.pixel_height, self.crs.name
        )
    }
}
