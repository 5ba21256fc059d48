use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use ndvipro::api;
use ndvipro::core::params::PipelineParams;
use ndvipro::io::{CatalogOptions, LocalCatalog, parse_region};
use ndvipro::{CancelToken, Error, SharedCatalog};

use super::args::CliArgs;
use super::errors::AppError;

pub fn run(args: CliArgs) -> Result<(), Error> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;

    let region_input = load_region_input(&args.region)?;
    let region = parse_region(&region_input)?;

    let params = PipelineParams {
        start,
        end,
        max_cloud_fraction: args.max_cloud,
        threshold: args.threshold,
        composite: args.composite,
        unit: args.unit,
        concurrency: args.concurrency,
        fetch_timeout_secs: args.fetch_timeout,
    };
    params.validate()?;

    let options = CatalogOptions {
        max_retries: args.fetch_retries,
        ..CatalogOptions::default()
    };
    let catalog: SharedCatalog = Arc::new(LocalCatalog::open(&args.input, options)?);

    let cancel = CancelToken::new();
    let outcome = api::run_pipeline(&catalog, &region, &params, &cancel)?;

    if let Some(output) = &args.output {
        api::save_composite(&outcome, &params, output)?;
        info!("composite written to {:?}", output);
    }

    let document = api::run_summary(&outcome, args.summary.as_deref())?;
    println!("{}", document);

    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::InvalidDate {
            value: value.to_string(),
        }
        .into()
    })
}

/// Resolve the region argument: `@file` or a bare path to an existing file
/// loads the file contents; anything else is treated as inline WKT/GeoJSON.
fn load_region_input(region: &str) -> Result<String, Error> {
    if let Some(path) = region.strip_prefix('@') {
        return fs::read_to_string(path).map_err(|source| {
            AppError::RegionFile {
                path: path.to_string(),
                source,
            }
            .into()
        });
    }
    let candidate = Path::new(region);
    if candidate.is_file() {
        return fs::read_to_string(candidate).map_err(|source| {
            AppError::RegionFile {
                path: region.to_string(),
                source,
            }
            .into()
        });
    }
    Ok(region.to_string())
}
