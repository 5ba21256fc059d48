use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::grid::GeoTransform;
use crate::error::Result;

/// Write a world file next to the raster image using the provided
/// geotransform. The world file stores the transform in pixel-center
/// convention.
pub fn write_world_file(output_image: &Path, transform: &GeoTransform) -> Result<()> {
    let ext = output_image
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let world_ext = match ext.as_str() {
        "tif" | "tiff" => "tfw",
        _ => "wld",
    };
    let world_path = output_image.with_extension(world_ext);

    // World file parameters: A = pixel size in X, D/B = rotations,
    // E = pixel size in Y, C/F = center of the upper-left pixel
    let a = transform.pixel_width;
    let d = transform.col_rotation;
    let b = transform.row_rotation;
    let e = transform.pixel_height;
    let c = transform.origin_x + 0.5 * a + 0.5 * b;
    let f = transform.origin_y + 0.5 * d + 0.5 * e;

    let mut file = File::create(world_path)?;
    // One value per line, high precision
    writeln!(file, "{:.12}", a)?;
    writeln!(file, "{:.12}", d)?;
    writeln!(file, "{:.12}", b)?;
    writeln!(file, "{:.12}", e)?;
    writeln!(file, "{:.12}", c)?;
    writeln!(file, "{:.12}", f)?;

    Ok(())
}

/// Write a .prj file with the provided projection (WKT or EPSG:XXXX)
pub fn write_prj_file(output_image: &Path, projection: &str) -> Result<()> {
    let prj_path = output_image.with_extension("prj");
    std::fs::write(prj_path, projection.as_bytes())?;
    Ok(())
}
