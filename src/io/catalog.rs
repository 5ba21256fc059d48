//! The pluggable catalog interface: list scenes matching a query, fetch
//! band data for a scene. Implementations may be backed by a local
//! directory, an object store, or a remote imagery API; the pipeline only
//! sees this trait.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use geo_types::Polygon;
use ndarray::Array2;
use thiserror::Error;

use crate::core::grid::Grid;

/// Errors raised by catalog implementations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),
    #[error("Metadata error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing field `{0}` in scene metadata")]
    MissingField(&'static str),
    #[error("Malformed scene `{scene}`: {reason}")]
    Malformed { scene: String, reason: String },
    #[error("Unsupported TIFF sample format: {0}")]
    UnsupportedFormat(String),
    #[error("Fetch for scene `{scene}` timed out after {seconds} s")]
    Timeout { scene: String, seconds: u64 },
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Scene selection criteria: spatial bounds, half-open date range
/// `[start, end)`, and a quality ceiling.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub region: Polygon<f64>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Scenes with a cloud fraction above this are excluded
    pub max_cloud_fraction: f64,
}

/// One catalog entry. Listing is metadata-only; band grids are fetched
/// separately so a query never pulls pixel data it will not use.
#[derive(Debug, Clone)]
pub struct SceneRecord {
    pub id: String,
    pub acquired: DateTime<Utc>,
    pub cloud_cover: f64,
    pub footprint: Polygon<f64>,
}

/// Fetched band data for one scene, bound to the scene's native grid.
#[derive(Debug, Clone)]
pub struct SceneBands {
    pub grid: Grid,
    pub nir: Array2<f64>,
    pub red: Array2<f64>,
}

/// A source of scenes. `list` returns an empty vector (not an error) when
/// nothing matches, ordered stably for identical queries. Implementations
/// are responsible for their own transient-failure retries; the pipeline
/// adds the per-fetch timeout on top.
pub trait SceneCatalog: Send + Sync {
    fn list(&self, query: &CatalogQuery) -> Result<Vec<SceneRecord>, CatalogError>;
    fn fetch_bands(&self, record: &SceneRecord) -> Result<SceneBands, CatalogError>;
}

/// Configuration for catalog implementations.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Maximum retries on a failed band fetch (default 2)
    pub max_retries: u32,
    /// Base delay between retries, doubled after each attempt (default 500 ms)
    pub retry_backoff: Duration,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
        }
    }
}
