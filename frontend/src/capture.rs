use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use vgasim_core::config::Resolution;
use vgasim_core::error::SimError;

/// `frame-<unix millis>.png` inside `dir`.
pub fn capture_path(dir: &Path) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    dir.join(format!("frame-{millis}.png"))
}

/// Encode an RGBA frame as an 8-bit PNG.
pub fn write_png(path: &Path, geometry: Resolution, rgba: &[u8]) -> Result<(), SimError> {
    let err = |e: &dyn std::fmt::Display| SimError::Capture(format!("{}: {e}", path.display()));

    let file = File::create(path).map_err(|e| err(&e))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), geometry.width, geometry.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header().map_err(|e| err(&e))?;
    writer.write_image_data(rgba).map_err(|e| err(&e))?;
    Ok(())
}
