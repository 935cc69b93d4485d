//! NIST atomic line list parsing
//!
//! The NIST Atomic Spectra Database exports CSV tables whose numeric
//! fields arrive wrapped in spreadsheet-style quoting (`="763.5106"`).
//! This module cleans those exports into a plain list of emission lines
//! for spectrum synthesis.

use std::path::Path;

use log::info;
use thiserror::Error;

const WAVELENGTH_COLUMN: &str = "obs_wl_air(nm)";
const INTENSITY_COLUMN: &str = "intens";

/// Errors that can occur while loading a line list
#[derive(Debug, Error)]
pub enum LineListError {
    #[error("Failed to read line list: {0}")]
    Table(#[from] csv::Error),

    #[error("Line list is missing required column '{0}'")]
    MissingColumn(String),

    #[error("No rows contained a usable wavelength")]
    NoUsableLines,
}

/// A single emission line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralLine {
    /// Observed wavelength in air, nanometers
    pub wavelength: f64,

    /// Relative intensity in NIST's arbitrary units
    pub intensity: f64,
}

/// Emission lines extracted from a NIST export.
#[derive(Debug, Clone)]
pub struct LineList {
    lines: Vec<SpectralLine>,
}

impl LineList {
    /// Loads emission lines from a NIST ASD CSV export.
    ///
    /// Rows without a parseable observed wavelength are skipped. Rows
    /// without a parseable intensity keep the line with intensity 1.0,
    /// since NIST omits intensities for weakly characterized lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the wavelength or
    /// intensity column is missing, or no row yields a usable wavelength.
    pub fn from_nist_csv(path: &Path) -> Result<Self, LineListError> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();
        let wl_col = headers
            .iter()
            .position(|h| h.trim() == WAVELENGTH_COLUMN)
            .ok_or_else(|| LineListError::MissingColumn(WAVELENGTH_COLUMN.to_string()))?;
        let intens_col = headers
            .iter()
            .position(|h| h.trim() == INTENSITY_COLUMN)
            .ok_or_else(|| LineListError::MissingColumn(INTENSITY_COLUMN.to_string()))?;

        let mut lines = Vec::new();
        for record in reader.records() {
            let record = record?;
            let wavelength = match parse_nist_field(record.get(wl_col).unwrap_or("")) {
                Some(w) => w,
                None => continue,
            };
            let intensity =
                parse_nist_field(record.get(intens_col).unwrap_or("")).unwrap_or(1.0);
            lines.push(SpectralLine {
                wavelength,
                intensity,
            });
        }

        if lines.is_empty() {
            return Err(LineListError::NoUsableLines);
        }

        info!("loaded {} emission lines from {}", lines.len(), path.display());
        Ok(Self { lines })
    }

    /// Wraps an already-built set of lines.
    pub fn from_lines(lines: Vec<SpectralLine>) -> Self {
        Self { lines }
    }

    /// The parsed emission lines, in file order.
    pub fn lines(&self) -> &[SpectralLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Strips NIST spreadsheet quoting and parses the remainder as a number.
fn parse_nist_field(field: &str) -> Option<f64> {
    let cleaned = field.replace("=\"", "").replace('"', "");
    cleaned.trim().parse().ok()
}
