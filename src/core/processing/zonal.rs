//! Zonal area aggregation: physical pixel areas and the masked-area sum
//! inside a region of interest.
//!
//! Membership policy: a pixel contributes when the mask is true AND the
//! pixel center falls inside the region polygon (pixel-center-in-polygon).
//! Partial pixel/region overlap is not prorated; the simplification is
//! deliberate and consistent across runs.

use geo::{Contains, Point};
use geo_types::Polygon;
use ndarray::Array2;
use serde::Serialize;

use crate::core::grid::Grid;
use crate::core::raster::Mask;
use crate::error::{Error, Result};
use crate::types::{AreaUnit, CrsKind};

/// WGS84 ellipsoid parameters
const WGS84_A: f64 = 6_378_137.0;
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Aggregated area over the masked pixels inside the region.
#[derive(Debug, Clone, Serialize)]
pub struct AreaSummary {
    /// Area in the requested unit
    pub area: f64,
    pub unit: AreaUnit,
    /// Same area in square meters
    pub area_m2: f64,
    /// Mask pixels that passed the threshold
    pub masked_pixels: usize,
    /// Pixels whose center lies inside the region
    pub region_pixels: usize,
}

/// Ground area in m² of a geographic-grid cell at the given latitude.
///
/// Uses the WGS84 radii of curvature: meridional (M) for the north-south
/// extent and prime-vertical (N) for the east-west extent.
fn geographic_cell_area(latitude_deg: f64, d_lon_deg: f64, d_lat_deg: f64) -> f64 {
    let lat = latitude_deg.to_radians();
    let e2 = 2.0 * WGS84_F - WGS84_F * WGS84_F;

    let sin_lat = lat.sin();
    let cos_lat = lat.cos();

    let n = WGS84_A / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let m = WGS84_A * (1.0 - e2) / (1.0 - e2 * sin_lat * sin_lat).powf(1.5);

    let dx = n * cos_lat * d_lon_deg.to_radians();
    let dy = m * d_lat_deg.to_radians();

    (dx * dy).abs()
}

/// Per-pixel ground area in m² for a grid.
///
/// Projected grids have a constant cell area `|pixel_width * pixel_height|`.
/// Geographic grids get a spheroidal area evaluated at each pixel-center
/// latitude, so the area shrinks toward the poles.
pub fn pixel_areas(grid: &Grid) -> Array2<f64> {
    let (rows, cols) = grid.shape();
    let t = &grid.transform;
    match grid.crs.kind {
        CrsKind::Projected => {
            let area = (t.pixel_width * t.pixel_height).abs();
            Array2::from_elem((rows, cols), area)
        }
        CrsKind::Geographic => Array2::from_shape_fn((rows, cols), |(row, col)| {
            let (_, lat) = t.pixel_center(row, col);
            geographic_cell_area(lat, t.pixel_width, t.pixel_height)
        }),
    }
}

/// Sum the physical area over pixels where `mask` is true and the pixel
/// center lies inside `region`. Returns square meters (always ≥ 0).
///
/// The `areas` grid must match the mask dimensions; a mismatch is a
/// precondition violation, not something silently reconciled.
pub fn masked_area_m2(mask: &Mask, areas: &Array2<f64>, region: &Polygon<f64>) -> Result<f64> {
    let (rows, cols) = mask.grid.shape();
    let (a_rows, a_cols) = areas.dim();
    if (rows, cols) != (a_rows, a_cols) {
        return Err(Error::DimensionMismatch {
            expected_rows: rows,
            expected_cols: cols,
            actual_rows: a_rows,
            actual_cols: a_cols,
        });
    }

    let mut total = 0.0;
    for row in 0..rows {
        for col in 0..cols {
            if !mask.get(row, col) {
                continue;
            }
            let (x, y) = mask.grid.transform.pixel_center(row, col);
            if region.contains(&Point::new(x, y)) {
                total += areas[[row, col]];
            }
        }
    }
    Ok(total)
}

/// Full aggregation: derive the pixel-area grid from the mask's own grid,
/// sum the masked area inside `region`, and convert to `unit`.
pub fn summarize(mask: &Mask, region: &Polygon<f64>, unit: AreaUnit) -> Result<AreaSummary> {
    let areas = pixel_areas(&mask.grid);
    let area_m2 = masked_area_m2(mask, &areas, region)?;

    let (rows, cols) = mask.grid.shape();
    let mut region_pixels = 0;
    for row in 0..rows {
        for col in 0..cols {
            let (x, y) = mask.grid.transform.pixel_center(row, col);
            if region.contains(&Point::new(x, y)) {
                region_pixels += 1;
            }
        }
    }

    Ok(AreaSummary {
        area: unit.from_m2(area_m2),
        unit,
        area_m2,
        masked_pixels: mask.count_true(),
        region_pixels,
    })
}
