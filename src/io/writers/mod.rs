pub mod metadata;
pub mod tiff;
pub mod worldfile;
