use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::TiffEncoder;
use tiff::encoder::colortype::Gray32Float;

use crate::error::Result;

/// Write a single-band 32-bit float TIFF. NaN samples pass through
/// unchanged, preserving undefined pixels in the output.
pub fn write_gray_f32(output: &Path, cols: usize, rows: usize, data: &[f32]) -> Result<()> {
    let file = File::create(output)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
    encoder.write_image::<Gray32Float>(cols as u32, rows as u32, data)?;
    Ok(())
}
