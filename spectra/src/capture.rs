//! Spectrometer capture file parsing
//!
//! OceanOptics-style spectrometer dumps carry a free-form header followed
//! by a marker line and tab-separated wavelength/intensity pairs. This
//! module recovers the data section from such files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

const SPECTRAL_DATA_MARKER: &str = ">>>>>Begin Spectral Data<<<<<";

/// Errors that can occur while parsing a capture file
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to read capture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Capture file has no spectral data marker")]
    MissingMarker,

    #[error("No data rows followed the spectral data marker")]
    NoData,
}

/// Reads wavelength/intensity pairs from a spectrometer capture file.
///
/// Everything before the `>>>>>Begin Spectral Data<<<<<` marker is
/// ignored. After the marker, each line must hold exactly two
/// tab-separated numbers; lines that don't are skipped, which tolerates
/// trailing instrument chatter and blank lines.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the marker never
/// appears, or no parseable rows follow it.
pub fn parse_capture(path: &Path) -> Result<(Vec<f64>, Vec<f64>), CaptureError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut wavelengths = Vec::new();
    let mut intensities = Vec::new();
    let mut in_data_section = false;
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.contains(SPECTRAL_DATA_MARKER) {
            in_data_section = true;
            continue;
        }
        if !in_data_section {
            continue;
        }

        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() != 2 {
            skipped += 1;
            continue;
        }
        match (
            fields[0].trim().parse::<f64>(),
            fields[1].trim().parse::<f64>(),
        ) {
            (Ok(wavelength), Ok(intensity)) => {
                wavelengths.push(wavelength);
                intensities.push(intensity);
            }
            _ => skipped += 1,
        }
    }

    if !in_data_section {
        return Err(CaptureError::MissingMarker);
    }

    if wavelengths.is_empty() {
        return Err(CaptureError::NoData);
    }

    if skipped > 0 {
        warn!("skipped {skipped} unparseable rows in {}", path.display());
    }
    info!(
        "parsed {} spectral samples from {}",
        wavelengths.len(),
        path.display()
    );

    Ok((wavelengths, intensities))
}
