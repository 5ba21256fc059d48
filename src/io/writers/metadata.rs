//! JSON sidecar and summary documents describing a pipeline run.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::core::params::PipelineParams;
use crate::core::processing::zonal::AreaSummary;
use crate::core::raster::Raster;
use crate::error::Result;

/// Provenance document written next to the composite raster.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeSidecar {
    pub generated: String,
    pub tool: String,
    pub tool_version: String,
    pub crs: String,
    pub transform: [f64; 6],
    pub rows: usize,
    pub cols: usize,
    pub start: String,
    pub end: String,
    pub composite: String,
    pub threshold: f64,
    pub max_cloud_fraction: f64,
    pub scenes_used: usize,
    pub scenes_dropped: usize,
}

/// Assemble the provenance sidecar for a composite raster.
pub fn composite_sidecar(
    composite: &Raster,
    params: &PipelineParams,
    scenes_used: usize,
    scenes_dropped: usize,
) -> CompositeSidecar {
    CompositeSidecar {
        generated: Utc::now().to_rfc3339(),
        tool: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        crs: composite.grid.crs.name.clone(),
        transform: composite.grid.transform.to_coeffs(),
        rows: composite.grid.rows,
        cols: composite.grid.cols,
        start: params.start.to_string(),
        end: params.end.to_string(),
        composite: params.composite.to_string(),
        threshold: params.threshold,
        max_cloud_fraction: params.max_cloud_fraction,
        scenes_used,
        scenes_dropped,
    }
}

/// Write the sidecar as `<output stem>.json` next to the raster.
pub fn write_composite_sidecar(output_image: &Path, sidecar: &CompositeSidecar) -> Result<()> {
    let path = output_image.with_extension("json");
    let json = serde_json::to_string_pretty(sidecar)
        .map_err(|e| crate::Error::Processing(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Build the one-line summary document, keyed by the requested unit
/// (e.g. `area_ha`), with supporting counts.
pub fn summary_document(
    summary: &AreaSummary,
    scenes_listed: usize,
    scenes_used: usize,
    scenes_dropped: usize,
) -> serde_json::Value {
    let mut doc = serde_json::Map::new();
    doc.insert(format!("area_{}", summary.unit.suffix()), json!(summary.area));
    doc.insert("area_m2".to_string(), json!(summary.area_m2));
    doc.insert("masked_pixels".to_string(), json!(summary.masked_pixels));
    doc.insert("region_pixels".to_string(), json!(summary.region_pixels));
    doc.insert("scenes_listed".to_string(), json!(scenes_listed));
    doc.insert("scenes_used".to_string(), json!(scenes_used));
    doc.insert("scenes_dropped".to_string(), json!(scenes_dropped));
    serde_json::Value::Object(doc)
}

/// Write the summary as a single JSON line.
pub fn write_summary(path: &Path, document: &serde_json::Value) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{}", document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AreaUnit;

    fn summary() -> AreaSummary {
        AreaSummary {
            area: 0.03,
            unit: AreaUnit::Hectares,
            area_m2: 300.0,
            masked_pixels: 3,
            region_pixels: 4,
        }
    }

    #[test]
    fn summary_key_follows_unit() {
        let doc = summary_document(&summary(), 3, 3, 0);
        assert_eq!(doc["area_ha"], json!(0.03));
        assert_eq!(doc["area_m2"], json!(300.0));
        assert_eq!(doc["masked_pixels"], json!(3));
        assert_eq!(doc["scenes_dropped"], json!(0));
    }

    #[test]
    fn summary_is_one_line() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("summary.json");
        write_summary(&path, &summary_document(&summary(), 3, 3, 0)).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("\"area_ha\""));
    }
}
