//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, catalog, and region errors, and provides semantic
//! variants for the pipeline's precondition violations.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::io::CatalogError),

    #[error("Region error: {0}")]
    Region(#[from] crate::io::RegionError),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("No scenes available for compositing")]
    EmptyInput,

    #[error("Raster grids do not align: expected {expected}, got {actual}")]
    GridMismatch { expected: String, actual: String },

    #[error("Dimension mismatch: expected {expected_rows}x{expected_cols}, got {actual_rows}x{actual_cols}")]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    #[error("Pipeline cancelled")]
    Cancelled,

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn config<S: std::fmt::Display>(msg: S) -> Self {
        Error::Config(msg.to_string())
    }
}
