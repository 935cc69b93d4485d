//! Image loading and CSV export around the digitization core

use std::path::Path;

use image::RgbImage;
use log::info;

use crate::digitize::{DigitizeError, Sample};

/// Load and decode a source image, converting to 8-bit RGB.
///
/// Decode failures surface as `DigitizeError::InvalidInput` so a broken file
/// reports through the same taxonomy as a malformed in-memory image.
pub fn load_image(path: &Path) -> Result<RgbImage, DigitizeError> {
    let decoded = image::open(path)
        .map_err(|e| DigitizeError::InvalidInput(format!("{}: {e}", path.display())))?;
    let rgb = decoded.to_rgb8();
    info!(
        "loaded {} ({}x{} px)",
        path.display(),
        rgb.width(),
        rgb.height()
    );
    Ok(rgb)
}

/// Write digitized samples as two-column CSV with a header row.
pub fn write_samples_csv(path: &Path, samples: &[Sample]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["X", "Normalized Amplitude"])?;
    for sample in samples {
        writer.write_record([sample.x.to_string(), sample.y.to_string()])?;
    }
    writer.flush()?;
    info!("wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}
