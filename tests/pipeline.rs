//! End-to-end pipeline tests over a directory-backed catalog, plus CLI
//! exit-code behavior.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use ndvipro::io::local::{BandFiles, SceneSidecar, SIDECAR_FILE};
use ndvipro::io::writers::tiff::write_gray_f32;
use ndvipro::{
    api, parse_region, CancelToken, CatalogOptions, Error, LocalCatalog, PipelineParams,
    SharedCatalog,
};
use tempfile::TempDir;

const REGION_WKT: &str =
    "POLYGON ((499990 4199970, 500030 4199970, 500030 4200010, 499990 4200010, 499990 4199970))";

fn write_scene(root: &Path, id: &str, acquired: &str, cloud_cover: f64, nir: &[f32], red: &[f32]) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).unwrap();
    let sidecar = SceneSidecar {
        id: id.to_string(),
        acquired: acquired.parse().unwrap(),
        cloud_cover,
        crs: "EPSG:32633".to_string(),
        transform: [500_000.0, 10.0, 0.0, 4_200_000.0, 0.0, -10.0],
        footprint: vec![
            [499_990.0, 4_199_970.0],
            [500_030.0, 4_199_970.0],
            [500_030.0, 4_200_010.0],
            [499_990.0, 4_200_010.0],
        ],
        nodata: None,
        bands: BandFiles {
            nir: "nir.tif".to_string(),
            red: "red.tif".to_string(),
        },
    };
    fs::write(
        dir.join(SIDECAR_FILE),
        serde_json::to_string_pretty(&sidecar).unwrap(),
    )
    .unwrap();
    write_gray_f32(&dir.join("nir.tif"), 2, 2, nir).unwrap();
    write_gray_f32(&dir.join("red.tif"), 2, 2, red).unwrap();
}

/// Three 2x2 scenes with hand-computed NDVI values. Per-pixel medians are
/// 0.4, 0.1, 0.5, 0.5 (the last pixel is undefined in scene 1, where both
/// bands are zero), so threshold 0.3 masks three pixels of 100 m² each.
fn write_fixture_scenes(root: &Path) {
    write_scene(
        root,
        "s1",
        "2024-06-03T10:30:00Z",
        0.05,
        &[0.8, 0.5, 0.75, 0.0],
        &[0.2, 0.5, 0.25, 0.0],
    );
    write_scene(
        root,
        "s2",
        "2024-06-10T10:30:00Z",
        0.10,
        &[0.6, 0.55, 0.75, 0.9],
        &[0.4, 0.45, 0.25, 0.1],
    );
    write_scene(
        root,
        "s3",
        "2024-06-20T10:30:00Z",
        0.00,
        &[0.7, 0.6, 0.25, 0.6],
        &[0.3, 0.4, 0.75, 0.4],
    );
}

fn params() -> PipelineParams {
    PipelineParams {
        start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        ..PipelineParams::default()
    }
}

fn open_catalog(root: &Path) -> SharedCatalog {
    Arc::new(LocalCatalog::open(root, CatalogOptions::default()).unwrap())
}

#[test]
fn end_to_end_median_composite_mask_and_area() {
    let tmp = TempDir::new().unwrap();
    write_fixture_scenes(tmp.path());

    let region = parse_region(REGION_WKT).unwrap();
    let outcome = api::run_pipeline(&open_catalog(tmp.path()), &region, &params(), &CancelToken::new())
        .unwrap();

    assert_eq!(outcome.scenes_listed, 3);
    assert_eq!(outcome.scenes_used, 3);
    assert_eq!(outcome.scenes_dropped, 0);

    // Band data goes through a 32-bit TIFF, so compare at f32 precision
    assert_relative_eq!(outcome.composite.get(0, 0), 0.4, epsilon = 1e-6);
    assert_relative_eq!(outcome.composite.get(0, 1), 0.1, epsilon = 1e-6);
    assert_relative_eq!(outcome.composite.get(1, 0), 0.5, epsilon = 1e-6);
    assert_relative_eq!(outcome.composite.get(1, 1), 0.5, epsilon = 1e-6);

    assert!(outcome.mask.get(0, 0));
    assert!(!outcome.mask.get(0, 1));
    assert!(outcome.mask.get(1, 0));
    assert!(outcome.mask.get(1, 1));

    // 3 masked pixels x 100 m² = 300 m² = 0.03 ha
    assert_relative_eq!(outcome.summary.area_m2, 300.0, epsilon = 1e-9);
    assert_relative_eq!(outcome.summary.area, 0.03, epsilon = 1e-12);
    assert_eq!(outcome.summary.masked_pixels, 3);
    assert_eq!(outcome.summary.region_pixels, 4);
}

#[test]
fn cloudy_and_out_of_range_scenes_are_excluded() {
    let tmp = TempDir::new().unwrap();
    write_fixture_scenes(tmp.path());
    // Would flip every median above the threshold if it were included
    write_scene(
        tmp.path(),
        "cloudy",
        "2024-06-15T10:30:00Z",
        0.95,
        &[1.0; 4],
        &[0.0; 4],
    );
    // Outside the half-open date range
    write_scene(
        tmp.path(),
        "too-late",
        "2024-07-01T00:00:00Z",
        0.0,
        &[1.0; 4],
        &[0.0; 4],
    );

    let region = parse_region(REGION_WKT).unwrap();
    let outcome = api::run_pipeline(&open_catalog(tmp.path()), &region, &params(), &CancelToken::new())
        .unwrap();

    assert_eq!(outcome.scenes_listed, 3);
    assert_relative_eq!(outcome.summary.area_m2, 300.0, epsilon = 1e-9);
}

#[test]
fn empty_catalog_reports_empty_input() {
    let tmp = TempDir::new().unwrap();
    let region = parse_region(REGION_WKT).unwrap();
    let err = api::run_pipeline(&open_catalog(tmp.path()), &region, &params(), &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
}

#[test]
fn disjoint_region_lists_no_scenes() {
    let tmp = TempDir::new().unwrap();
    write_fixture_scenes(tmp.path());
    let region =
        parse_region("POLYGON ((0 0, 100 0, 100 100, 0 100, 0 0))").unwrap();
    let err = api::run_pipeline(&open_catalog(tmp.path()), &region, &params(), &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
}

#[test]
fn cli_writes_composite_and_summary() {
    let tmp = TempDir::new().unwrap();
    let catalog_dir = tmp.path().join("catalog");
    fs::create_dir_all(&catalog_dir).unwrap();
    write_fixture_scenes(&catalog_dir);
    let composite_path = tmp.path().join("composite.tif");
    let summary_path = tmp.path().join("summary.json");

    let output = Command::new(env!("CARGO_BIN_EXE_ndvipro"))
        .arg("--input")
        .arg(&catalog_dir)
        .arg("--region")
        .arg(REGION_WKT)
        .arg("--start")
        .arg("2024-06-01")
        .arg("--end")
        .arg("2024-07-01")
        .arg("--output")
        .arg(&composite_path)
        .arg("--summary")
        .arg(&summary_path)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let document: serde_json::Value = stdout.lines().last().unwrap().parse().unwrap();
    assert_relative_eq!(document["area_ha"].as_f64().unwrap(), 0.03, epsilon = 1e-12);
    assert_eq!(document["masked_pixels"].as_u64().unwrap(), 3);

    assert!(composite_path.is_file());
    assert!(tmp.path().join("composite.tfw").is_file());
    assert!(tmp.path().join("composite.prj").is_file());
    assert!(tmp.path().join("composite.json").is_file());

    let summary_line = fs::read_to_string(&summary_path).unwrap();
    assert_eq!(summary_line.lines().count(), 1);
    assert!(summary_line.contains("\"area_ha\""));
}

#[test]
fn cli_empty_result_exits_with_code_3() {
    let tmp = TempDir::new().unwrap();
    let catalog_dir = tmp.path().join("catalog");
    fs::create_dir_all(&catalog_dir).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ndvipro"))
        .arg("--input")
        .arg(&catalog_dir)
        .arg("--region")
        .arg(REGION_WKT)
        .arg("--start")
        .arg("2024-06-01")
        .arg("--end")
        .arg("2024-07-01")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No scenes"), "stderr: {}", stderr);
}

#[test]
fn cli_bad_configuration_exits_with_code_2() {
    let tmp = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ndvipro"))
        .arg("--input")
        .arg(tmp.path())
        .arg("--region")
        .arg(REGION_WKT)
        .arg("--start")
        .arg("June 1st")
        .arg("--end")
        .arg("2024-07-01")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_missing_catalog_exits_with_code_4() {
    let output = Command::new(env!("CARGO_BIN_EXE_ndvipro"))
        .arg("--input")
        .arg("/definitely/not/a/catalog")
        .arg("--region")
        .arg(REGION_WKT)
        .arg("--start")
        .arg("2024-06-01")
        .arg("--end")
        .arg("2024-07-01")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
}
