//! High-level, ergonomic library API: run the pipeline against any catalog
//! and persist its outputs. Prefer these entrypoints over the low-level
//! processing modules when embedding NDVIPRO.
use std::path::Path;

use geo_types::Polygon;

use crate::core::params::PipelineParams;
use crate::core::processing::pipeline::{self, CancelToken, PipelineOutcome, SharedCatalog};
use crate::error::Result;
use crate::io::writers::metadata::{
    composite_sidecar, summary_document, write_composite_sidecar, write_summary,
};
use crate::io::writers::tiff::write_gray_f32;
use crate::io::writers::worldfile::{write_prj_file, write_world_file};

/// Run the full pipeline: catalog query → per-scene NDVI → temporal
/// composite → threshold mask → zonal area.
pub fn run_pipeline(
    catalog: &SharedCatalog,
    region: &Polygon<f64>,
    params: &PipelineParams,
    cancel: &CancelToken,
) -> Result<PipelineOutcome> {
    pipeline::run(catalog, region, params, cancel)
}

/// Save the composite raster as a 32-bit float TIFF, georeferenced with
/// world-file and .prj sidecars, plus a JSON provenance sidecar.
pub fn save_composite(
    outcome: &PipelineOutcome,
    params: &PipelineParams,
    output: &Path,
) -> Result<()> {
    let composite = &outcome.composite;
    let (rows, cols) = composite.grid.shape();
    let data: Vec<f32> = composite.data().iter().map(|&v| v as f32).collect();

    write_gray_f32(output, cols, rows, &data)?;
    write_world_file(output, &composite.grid.transform)?;
    write_prj_file(output, &composite.grid.crs.name)?;

    let sidecar = composite_sidecar(composite, params, outcome.scenes_used, outcome.scenes_dropped);
    write_composite_sidecar(output, &sidecar)
}

/// Build the one-line run summary, optionally writing it to `path`.
pub fn run_summary(
    outcome: &PipelineOutcome,
    path: Option<&Path>,
) -> Result<serde_json::Value> {
    let document = summary_document(
        &outcome.summary,
        outcome.scenes_listed,
        outcome.scenes_used,
        outcome.scenes_dropped,
    );
    if let Some(path) = path {
        write_summary(path, &document)?;
    }
    Ok(document)
}
