use clap::Parser;
use std::path::PathBuf;

use ndvipro::{AreaUnit, CompositeMethod};

#[derive(Parser)]
#[command(name = "ndvipro", version, about = "NDVIPRO CLI")]
pub struct CliArgs {
    /// Catalog root directory containing one subdirectory per scene
    #[arg(short, long)]
    pub input: PathBuf,

    /// Region of interest: WKT POLYGON or GeoJSON, inline or @file
    #[arg(short, long)]
    pub region: String,

    /// First acquisition date included in the query (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// First acquisition date excluded from the query (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    /// Maximum cloud-cover fraction for a scene to qualify
    #[arg(long, default_value_t = 0.2)]
    pub max_cloud: f64,

    /// NDVI threshold; pixels strictly above it count as vegetation
    #[arg(long, default_value_t = 0.3)]
    pub threshold: f64,

    /// Temporal reduction method (median, mean, min, max)
    #[arg(long, value_enum, default_value_t = CompositeMethod::Median)]
    pub composite: CompositeMethod,

    /// Output area unit (m2, ha, km2)
    #[arg(long, value_enum, default_value_t = AreaUnit::Hectares)]
    pub unit: AreaUnit,

    /// Worker threads for per-scene fetch and index computation
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Per-scene band fetch timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout: u64,

    /// Retries for a failed band fetch before the scene is dropped
    #[arg(long, default_value_t = 2)]
    pub fetch_retries: u32,

    /// Output path for the composite TIFF (written with .tfw/.prj/.json sidecars)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output path for the one-line JSON summary (always printed to stdout)
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
