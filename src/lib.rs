#![doc = r#"
NDVIPRO — an NDVI compositing and zonal area statistics pipeline.

This crate selects satellite scenes from a pluggable catalog, computes a
per-scene Normalized Difference Vegetation Index, reduces the stack to a
temporal composite, thresholds it into a vegetation mask, and reports the
masked area inside a region of interest. It powers the NDVIPRO CLI and can
be embedded in your own Rust applications.

Stability
---------
The public library API is experimental in initial releases. Breaking
changes can occur.

Add dependency
--------------
```toml
[dependencies]
ndvipro = "0.1"
```

Quick start: run the pipeline over a local catalog
--------------------------------------------------
```rust,no_run
use std::sync::Arc;

use ndvipro::{
    api, parse_region, CancelToken, CatalogOptions, LocalCatalog, PipelineParams, SharedCatalog,
};

fn main() -> ndvipro::Result<()> {
    let region = parse_region("POLYGON ((499990 4199970, 500030 4199970, 500030 4200010, 499990 4200010, 499990 4199970))")?;
    let params = PipelineParams {
        start: "2024-06-01".parse().expect("valid date"),
        end: "2024-07-01".parse().expect("valid date"),
        ..PipelineParams::default()
    };

    let catalog: SharedCatalog =
        Arc::new(LocalCatalog::open("/data/scenes", CatalogOptions::default())?);

    let outcome = api::run_pipeline(&catalog, &region, &params, &CancelToken::new())?;
    println!("area: {:.4} {}", outcome.summary.area, outcome.summary.unit);

    api::save_composite(&outcome, &params, std::path::Path::new("/out/composite.tif"))?;
    Ok(())
}
```

Bring your own catalog
----------------------
Implement [`SceneCatalog`] to plug in any scene source (object store,
remote imagery API, test fixtures); the pipeline only depends on the
trait. The shipped [`LocalCatalog`] reads a directory of scene folders,
each holding a `scene.json` sidecar plus per-band TIFF files.

Error handling
--------------
All public functions return `ndvipro::Result<T>`; match on
[`Error`] to handle specific cases. Scenes that fail to fetch are dropped
with a warning; the run fails with [`Error::EmptyInput`] only when no
scene survives.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`types`] — enums and core types (e.g. `CompositeMethod`, `AreaUnit`).
- [`io`] — catalog trait and implementations, region parsing, writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::grid::{Crs, GeoTransform, Grid};
pub use core::params::PipelineParams;
pub use core::processing::pipeline::{CancelToken, PipelineOutcome, SharedCatalog};
pub use core::processing::zonal::AreaSummary;
pub use core::raster::{Mask, Raster};
pub use error::{Error, Result};
pub use types::{AreaUnit, CompositeMethod, CrsKind};

// Catalog interface and implementations
pub use io::catalog::{CatalogError, CatalogOptions, CatalogQuery, SceneBands, SceneCatalog, SceneRecord};
pub use io::local::LocalCatalog;
pub use io::region::{RegionError, parse_region};

// High-level API re-exports
pub use api::{run_pipeline, run_summary, save_composite};
