//! Pipeline orchestration: fan scenes out over a bounded worker pool,
//! compute per-scene NDVI, then reduce, classify, and aggregate.
//!
//! Scene processing is independent per scene; the compositor is the
//! synchronization barrier. A scene whose fetch times out or fails is
//! dropped with a warning rather than failing the run, unless every scene
//! drops. The whole run is cancellable via a [`CancelToken`] checked
//! between scene units and before the barrier.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use geo_types::Polygon;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::core::params::PipelineParams;
use crate::core::processing::zonal::AreaSummary;
use crate::core::processing::{classify, composite, index, zonal};
use crate::core::raster::{Mask, Raster};
use crate::error::{Error, Result};
use crate::io::catalog::{CatalogError, CatalogQuery, SceneBands, SceneCatalog, SceneRecord};

/// Shared handle to a scene source.
pub type SharedCatalog = Arc<dyn SceneCatalog>;

/// Cooperative cancellation token for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything a finished run produces.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub composite: Raster,
    pub mask: Mask,
    pub summary: AreaSummary,
    pub scenes_listed: usize,
    pub scenes_used: usize,
    pub scenes_dropped: usize,
}

/// Run the full pipeline: query → per-scene NDVI (parallel) → composite →
/// mask → zonal area.
pub fn run(
    catalog: &SharedCatalog,
    region: &Polygon<f64>,
    params: &PipelineParams,
    cancel: &CancelToken,
) -> Result<PipelineOutcome> {
    params.validate()?;

    let query = CatalogQuery {
        region: region.clone(),
        start: params.start,
        end: params.end,
        max_cloud_fraction: params.max_cloud_fraction,
    };
    let records = catalog.list(&query)?;
    let scenes_listed = records.len();
    info!(
        "catalog returned {} scene(s) for {}..{}",
        scenes_listed, params.start, params.end
    );
    if records.is_empty() {
        return Err(Error::EmptyInput);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.concurrency)
        .build()
        .map_err(|e| Error::Processing(e.to_string()))?;
    let timeout = Duration::from_secs(params.fetch_timeout_secs);

    let rasters: Vec<Option<Raster>> = pool.install(|| {
        records
            .par_iter()
            .map(|record| {
                if cancel.is_cancelled() {
                    return None;
                }
                match fetch_with_timeout(catalog, record, timeout) {
                    Ok(bands) => match index::scene_ndvi(bands.grid, bands.nir, bands.red) {
                        Ok(raster) => Some(raster),
                        Err(e) => {
                            warn!("scene {}: index computation failed: {}", record.id, e);
                            None
                        }
                    },
                    Err(e) => {
                        warn!("scene {}: dropped: {}", record.id, e);
                        None
                    }
                }
            })
            .collect()
    });

    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let stack: Vec<Raster> = rasters.into_iter().flatten().collect();
    let scenes_used = stack.len();
    let scenes_dropped = scenes_listed - scenes_used;
    if scenes_dropped > 0 {
        warn!("{} of {} scene(s) dropped", scenes_dropped, scenes_listed);
    }

    let composite = composite::composite(stack, params.composite)?;
    let mask = classify::threshold_mask(&composite, params.threshold);
    let summary = zonal::summarize(&mask, region, params.unit)?;
    info!(
        "masked area: {:.6} {} over {} pixel(s)",
        summary.area, summary.unit, summary.masked_pixels
    );

    Ok(PipelineOutcome {
        composite,
        mask,
        summary,
        scenes_listed,
        scenes_used,
        scenes_dropped,
    })
}

/// Run a band fetch on a helper thread, bounded by `timeout`. On timeout
/// the fetch is abandoned and the scene is reported as timed out; the
/// helper thread finishes (and is discarded) in the background.
fn fetch_with_timeout(
    catalog: &SharedCatalog,
    record: &SceneRecord,
    timeout: Duration,
) -> std::result::Result<SceneBands, CatalogError> {
    let (tx, rx) = mpsc::channel();
    let catalog = Arc::clone(catalog);
    let fetched = record.clone();
    thread::spawn(move || {
        let _ = tx.send(catalog.fetch_bands(&fetched));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(_) => Err(CatalogError::Timeout {
            scene: record.id.clone(),
            seconds: timeout.as_secs(),
        }),
    }
}
