//! Core building blocks: grid geometry, raster containers, pipeline
//! parameters, and the processing stages (index, composite, classify,
//! zonal, pipeline). These are internal primitives consumed by the
//! high-level `api` module.
pub mod grid;
pub mod params;
pub mod processing;
pub mod raster;
