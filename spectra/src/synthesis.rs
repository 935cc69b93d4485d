//! Synthetic spectrum generation from emission line lists
//!
//! Builds a reference spectrum for wavelength calibration by placing a
//! Gaussian profile at every catalogued emission line, summing the
//! profiles on a regular wavelength grid, and normalizing the result to
//! unit peak intensity.

use std::path::Path;

use log::info;
use thiserror::Error;

use crate::line_list::LineList;

/// Errors that can occur during spectrum synthesis
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Line list contains no lines")]
    EmptyLineList,

    #[error("Grid is empty: start {0} nm, end {1} nm, step {2} nm")]
    BadGrid(f64, f64, f64),

    #[error("Line FWHM must be positive, got {0}")]
    BadFwhm(f64),
}

/// Parameters for synthetic spectrum generation.
///
/// The defaults cover the 200-1500 nm range at 0.1 nm resolution with
/// 1 nm broadening, suitable for argon and mercury calibration lamps on
/// a typical grating spectrometer.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// First grid wavelength in nanometers
    pub start_nm: f64,

    /// Last grid wavelength in nanometers (inclusive)
    pub end_nm: f64,

    /// Grid spacing in nanometers
    pub step_nm: f64,

    /// Full width at half maximum of each line profile, nanometers
    pub fwhm_nm: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            start_nm: 200.0,
            end_nm: 1500.0,
            step_nm: 0.1,
            fwhm_nm: 1.0,
        }
    }
}

/// A synthetic spectrum on a regular wavelength grid.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Grid wavelengths in nanometers (nm)
    pub wavelengths: Vec<f64>,

    /// Intensity at each grid wavelength, normalized to unit peak
    pub intensities: Vec<f64>,
}

impl Spectrum {
    /// Writes the spectrum as a two-column CSV.
    pub fn write_csv(&self, path: &Path) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["Wavelength (nm)", "Normalized Intensity"])?;
        for (wavelength, intensity) in self.wavelengths.iter().zip(self.intensities.iter()) {
            writer.write_record([wavelength.to_string(), intensity.to_string()])?;
        }
        writer.flush()?;
        info!("wrote {} spectrum points to {}", self.wavelengths.len(), path.display());
        Ok(())
    }
}

/// Synthesizes a spectrum by Gaussian-broadening each emission line.
///
/// Every line contributes `intensity * exp(-0.5 ((w - line) / sigma)^2)`
/// at each grid wavelength, where `sigma` follows from the configured
/// FWHM. The summed spectrum is scaled to unit peak; if no line lands
/// near the grid the spectrum stays all zero.
///
/// # Arguments
///
/// * `lines` - Emission lines to broaden
/// * `config` - Grid range, spacing, and line width
///
/// # Errors
///
/// Returns an error if the line list is empty, the FWHM is not positive,
/// or the grid parameters produce no wavelengths.
pub fn synthesize(lines: &LineList, config: &SynthesisConfig) -> Result<Spectrum, SynthesisError> {
    if lines.is_empty() {
        return Err(SynthesisError::EmptyLineList);
    }

    if config.fwhm_nm <= 0.0 {
        return Err(SynthesisError::BadFwhm(config.fwhm_nm));
    }

    if config.step_nm <= 0.0 || config.end_nm < config.start_nm {
        return Err(SynthesisError::BadGrid(
            config.start_nm,
            config.end_nm,
            config.step_nm,
        ));
    }

    let sigma = config.fwhm_nm / (2.0 * (2.0 * std::f64::consts::LN_2).sqrt());

    let mut wavelengths = Vec::new();
    for step in 0.. {
        let wavelength = config.start_nm + step as f64 * config.step_nm;
        if wavelength > config.end_nm + 1e-9 {
            break;
        }
        wavelengths.push(wavelength);
    }

    let mut intensities = vec![0.0; wavelengths.len()];
    for line in lines.lines() {
        for (intensity, &wavelength) in intensities.iter_mut().zip(wavelengths.iter()) {
            let z = (wavelength - line.wavelength) / sigma;
            *intensity += line.intensity * (-0.5 * z * z).exp();
        }
    }

    let max_intensity = intensities.iter().fold(0.0_f64, |a, &b| a.max(b));
    if max_intensity > 0.0 {
        for intensity in &mut intensities {
            *intensity /= max_intensity;
        }
    }

    info!(
        "synthesized {} lines onto {} grid points",
        lines.len(),
        wavelengths.len()
    );

    Ok(Spectrum {
        wavelengths,
        intensities,
    })
}
