//! I/O layer: the pluggable scene catalog, the directory-backed catalog
//! implementation, region polygon parsing, and output `writers` for the
//! composite raster, its sidecars, and the run summary.
pub mod catalog;
pub use catalog::{CatalogError, CatalogOptions, CatalogQuery, SceneBands, SceneCatalog, SceneRecord};

pub mod local;
pub use local::LocalCatalog;

pub mod region;
pub use region::{RegionError, parse_region};

pub mod writers;
