//! Directory-backed scene catalog.
//!
//! Layout: one subdirectory per scene under the catalog root, each holding
//! a `scene.json` sidecar plus the per-band TIFF files it names:
//!
//! ```text
//! catalog/
//!   S2A_20240603/
//!     scene.json
//!     nir.tif
//!     red.tif
//! ```
//!
//! Listing reads sidecars only; pixel data is decoded on fetch. Transient
//! fetch failures are retried with bounded exponential backoff.

use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::thread;

use chrono::{DateTime, Utc};
use geo::Intersects;
use geo_types::{LineString, Polygon};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tiff::decoder::{Decoder, DecodingResult};
use tracing::{debug, warn};

use crate::core::grid::{Crs, GeoTransform, Grid};
use crate::io::catalog::{
    CatalogError, CatalogOptions, CatalogQuery, SceneBands, SceneCatalog, SceneRecord,
};

/// Sidecar file name expected in every scene directory.
pub const SIDECAR_FILE: &str = "scene.json";

/// On-disk scene metadata schema (`scene.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSidecar {
    pub id: String,
    pub acquired: DateTime<Utc>,
    /// Cloud-cover fraction in [0, 1]
    pub cloud_cover: f64,
    /// CRS identifier, e.g. `EPSG:32633`
    pub crs: String,
    /// GDAL-style geotransform coefficients
    pub transform: [f64; 6],
    /// Exterior ring of the scene footprint, in CRS coordinates
    pub footprint: Vec<[f64; 2]>,
    /// Optional nodata value mapped to undefined on read
    #[serde(default)]
    pub nodata: Option<f64>,
    pub bands: BandFiles,
}

/// Band file names relative to the scene directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandFiles {
    pub nir: String,
    pub red: String,
}

impl SceneSidecar {
    fn to_record(&self) -> Result<SceneRecord, CatalogError> {
        if self.footprint.len() < 3 {
            return Err(CatalogError::Malformed {
                scene: self.id.clone(),
                reason: format!("footprint has {} point(s), need at least 3", self.footprint.len()),
            });
        }
        let ring: Vec<(f64, f64)> = self.footprint.iter().map(|p| (p[0], p[1])).collect();
        Ok(SceneRecord {
            id: self.id.clone(),
            acquired: self.acquired,
            cloud_cover: self.cloud_cover,
            footprint: Polygon::new(LineString::from(ring), vec![]),
        })
    }
}

/// Catalog over a local directory of scene folders.
pub struct LocalCatalog {
    root: PathBuf,
    options: CatalogOptions,
}

impl LocalCatalog {
    /// Open a catalog root directory.
    pub fn open<P: AsRef<Path>>(root: P, options: CatalogOptions) -> Result<Self, CatalogError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(CatalogError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("catalog root is not a directory: {}", root.display()),
            )));
        }
        Ok(Self { root, options })
    }

    fn try_fetch(&self, record: &SceneRecord) -> Result<SceneBands, CatalogError> {
        let dir = self.root.join(&record.id);
        let sidecar = read_sidecar(&dir.join(SIDECAR_FILE))?;

        let nir = read_band(&dir.join(&sidecar.bands.nir), sidecar.nodata)?;
        let red = read_band(&dir.join(&sidecar.bands.red), sidecar.nodata)?;
        if nir.dim() != red.dim() {
            return Err(CatalogError::Malformed {
                scene: record.id.clone(),
                reason: format!("band shapes differ: {:?} vs {:?}", nir.dim(), red.dim()),
            });
        }

        let (rows, cols) = nir.dim();
        let grid = Grid::new(
            rows,
            cols,
            GeoTransform::from_coeffs(sidecar.transform),
            Crs::from_name(&sidecar.crs),
        );
        Ok(SceneBands { grid, nir, red })
    }
}

impl SceneCatalog for LocalCatalog {
    fn list(&self, query: &CatalogQuery) -> Result<Vec<SceneRecord>, CatalogError> {
        let mut records = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let sidecar_path = path.join(SIDECAR_FILE);
            if !sidecar_path.is_file() {
                debug!("skipping {}: no {}", path.display(), SIDECAR_FILE);
                continue;
            }

            let record = read_sidecar(&sidecar_path)?.to_record()?;

            let day = record.acquired.date_naive();
            if day < query.start || day >= query.end {
                continue;
            }
            if record.cloud_cover > query.max_cloud_fraction {
                continue;
            }
            if !record.footprint.intersects(&query.region) {
                continue;
            }
            records.push(record);
        }

        // Stable order for identical queries
        records.sort_by(|a, b| a.acquired.cmp(&b.acquired).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    fn fetch_bands(&self, record: &SceneRecord) -> Result<SceneBands, CatalogError> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(record) {
                Ok(bands) => return Ok(bands),
                Err(e) if attempt < self.options.max_retries => {
                    warn!(
                        "fetch attempt {} for scene {} failed: {}; retrying",
                        attempt + 1,
                        record.id,
                        e
                    );
                    thread::sleep(self.options.retry_backoff * 2u32.pow(attempt));
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn read_sidecar(path: &Path) -> Result<SceneSidecar, CatalogError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Decode a single-band TIFF into an `Array2<f64>`, mapping the declared
/// nodata value to NaN.
fn read_band(path: &Path, nodata: Option<f64>) -> Result<Array2<f64>, CatalogError> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;

    let data: Vec<f64> = match decoder.read_image()? {
        DecodingResult::U8(buf) => buf.into_iter().map(|v| v as f64).collect(),
        DecodingResult::U16(buf) => buf.into_iter().map(|v| v as f64).collect(),
        DecodingResult::U32(buf) => buf.into_iter().map(|v| v as f64).collect(),
        DecodingResult::I16(buf) => buf.into_iter().map(|v| v as f64).collect(),
        DecodingResult::I32(buf) => buf.into_iter().map(|v| v as f64).collect(),
        DecodingResult::F32(buf) => buf.into_iter().map(|v| v as f64).collect(),
        DecodingResult::F64(buf) => buf,
        _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
    };

    let mut band = Array2::from_shape_vec((height as usize, width as usize), data)
        .map_err(|e| CatalogError::Parse(e.to_string()))?;

    if let Some(nd) = nodata {
        band.mapv_inplace(|v| if (v - nd).abs() < f64::EPSILON { f64::NAN } else { v });
    }
    Ok(band)
}
