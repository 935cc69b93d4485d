//! Quantum efficiency curve modeling and resampling
//!
//! Sensor vendors publish quantum efficiency as a sparse table of
//! wavelength/efficiency pairs. This module loads such tables, fits a
//! quadratic spline through them, and resamples the fitted curve onto a
//! regular wavelength grid for downstream photometric work.

use std::path::Path;

use log::info;
use thiserror::Error;

use crate::interpolate::{interp, InterpError, QuadraticSpline, SplineError};

const WAVELENGTH_COLUMN: &str = "Wavelength (nm)";
const EFFICIENCY_COLUMN: &str = "Quantum Efficiency";

/// Errors that can occur with quantum efficiency curves
#[derive(Debug, Error)]
pub enum QeCurveError {
    #[error("Failed to read QE table: {0}")]
    Table(#[from] csv::Error),

    #[error("QE table is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Line {0}: could not parse '{1}' as a number")]
    BadNumber(usize, String),

    #[error("QE table has no data rows")]
    EmptyTable,

    #[error("Wavelength and efficiency vectors must have the same length")]
    LengthMismatch,

    #[error("Wavelengths must be finite, got {0}")]
    NotFinite(f64),

    #[error("Wavelengths must be in ascending order")]
    NotAscending,

    #[error("QE table needs at least 3 points for spline fitting")]
    TooFewPoints,

    #[error("Efficiency values must be between 0.0 and 1.0")]
    OutOfRange,

    #[error("Resample interval must be positive, got {0}")]
    BadInterval(f64),
}

/// Models the quantum efficiency of a sensor across a range of wavelengths
///
/// The curve keeps the measured table alongside a quadratic spline fitted
/// through it, so callers can query both the raw points and smooth values
/// at arbitrary wavelengths.
#[derive(Debug, Clone)]
pub struct QeCurve {
    /// Wavelengths in nanometers (nm)
    wavelengths: Vec<f64>,

    /// Efficiency values (0.0 to 1.0) corresponding to each wavelength
    efficiencies: Vec<f64>,

    spline: QuadraticSpline,
}

impl QeCurve {
    /// Loads a QE curve from a CSV table.
    ///
    /// The file must carry `Wavelength (nm)` and `Quantum Efficiency`
    /// columns; any other columns are ignored.
    ///
    /// # Arguments
    ///
    /// * `path` - CSV file with one row per measured wavelength
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a required column is
    /// missing, a value fails to parse, or the table fails the checks in
    /// [`QeCurve::from_table`].
    pub fn from_csv(path: &Path) -> Result<Self, QeCurveError> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();
        let wl_col = column_index(&headers, WAVELENGTH_COLUMN)?;
        let qe_col = column_index(&headers, EFFICIENCY_COLUMN)?;

        let mut wavelengths = Vec::new();
        let mut efficiencies = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            wavelengths.push(parse_field(&record, wl_col, row)?);
            efficiencies.push(parse_field(&record, qe_col, row)?);
        }

        if wavelengths.is_empty() {
            return Err(QeCurveError::EmptyTable);
        }

        info!("loaded {} QE points from {}", wavelengths.len(), path.display());
        Self::from_table(wavelengths, efficiencies)
    }

    /// Creates a QE curve from wavelength and efficiency tables.
    ///
    /// # Arguments
    ///
    /// * `wavelengths` - Wavelengths in nanometers, must be in ascending order
    /// * `efficiencies` - Efficiency values (0.0 to 1.0) for each wavelength
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The vectors have different lengths
    /// - Fewer than 3 points are provided
    /// - Any wavelength is NaN or infinite
    /// - Wavelengths are not in ascending order
    /// - Any efficiency value is outside the range [0.0, 1.0]
    pub fn from_table(
        wavelengths: Vec<f64>,
        efficiencies: Vec<f64>,
    ) -> Result<Self, QeCurveError> {
        for &wavelength in &wavelengths {
            if !wavelength.is_finite() {
                return Err(QeCurveError::NotFinite(wavelength));
            }
        }

        for &efficiency in &efficiencies {
            if !(0.0..=1.0).contains(&efficiency) {
                return Err(QeCurveError::OutOfRange);
            }
        }

        let spline = QuadraticSpline::new(&wavelengths, &efficiencies).map_err(|e| match e {
            SplineError::MismatchedLengths => QeCurveError::LengthMismatch,
            SplineError::InsufficientData => QeCurveError::TooFewPoints,
            SplineError::UnsortedData => QeCurveError::NotAscending,
        })?;

        Ok(Self {
            wavelengths,
            efficiencies,
            spline,
        })
    }

    /// Measured wavelengths in nanometers.
    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    /// Measured efficiency values.
    pub fn efficiencies(&self) -> &[f64] {
        &self.efficiencies
    }

    /// Lowest measured wavelength.
    pub fn min_wavelength(&self) -> f64 {
        self.wavelengths[0]
    }

    /// Highest measured wavelength.
    pub fn max_wavelength(&self) -> f64 {
        self.wavelengths[self.wavelengths.len() - 1]
    }

    /// The highest measured point as a `(wavelength, efficiency)` pair.
    ///
    /// Ties resolve to the lowest wavelength. The peak comes from the
    /// measured table, not the spline, so it always names a real data point.
    pub fn peak(&self) -> (f64, f64) {
        let mut best = 0;
        for i in 1..self.efficiencies.len() {
            if self.efficiencies[i] > self.efficiencies[best] {
                best = i;
            }
        }
        (self.wavelengths[best], self.efficiencies[best])
    }

    /// Smooth efficiency value at an arbitrary wavelength.
    ///
    /// Returns the raw spline value, which can overshoot below zero or
    /// above the measured maximum between knots. Use [`QeCurve::resample`]
    /// for clamped values.
    pub fn sample_at(&self, wavelength: f64) -> f64 {
        self.spline.eval(wavelength)
    }

    /// Resamples the fitted curve onto a regular wavelength grid.
    ///
    /// The grid runs from `min_wavelength` to `max_wavelength` (inclusive,
    /// defaulting to the measured range) in steps of `interval`. Spline
    /// values are clamped at zero so the output never reports a negative
    /// efficiency.
    ///
    /// # Arguments
    ///
    /// * `interval` - Grid spacing in nanometers, must be positive
    /// * `min_wavelength` - Optional grid start, defaults to the first measured point
    /// * `max_wavelength` - Optional grid end, defaults to the last measured point
    pub fn resample(
        &self,
        interval: f64,
        min_wavelength: Option<f64>,
        max_wavelength: Option<f64>,
    ) -> Result<ResampledCurve, QeCurveError> {
        if interval <= 0.0 {
            return Err(QeCurveError::BadInterval(interval));
        }

        let start = min_wavelength.unwrap_or_else(|| self.min_wavelength());
        let end = max_wavelength.unwrap_or_else(|| self.max_wavelength());

        let mut wavelengths = Vec::new();
        let mut efficiencies = Vec::new();
        for step in 0.. {
            // Multiply rather than accumulate so long grids don't drift.
            let wavelength = start + step as f64 * interval;
            if wavelength > end + 1e-9 {
                break;
            }
            wavelengths.push(wavelength);
            efficiencies.push(self.spline.eval(wavelength).max(0.0));
        }

        Ok(ResampledCurve {
            wavelengths,
            efficiencies,
        })
    }
}

/// QE curve evaluated on a regular wavelength grid.
#[derive(Debug, Clone)]
pub struct ResampledCurve {
    /// Grid wavelengths in nanometers (nm)
    pub wavelengths: Vec<f64>,

    /// Clamped efficiency values at each grid wavelength
    pub efficiencies: Vec<f64>,
}

impl ResampledCurve {
    /// Efficiency at a wavelength between grid points, linearly
    /// interpolated from the resampled table.
    ///
    /// This answers queries against the exported table itself, without
    /// refitting the spline the table came from.
    ///
    /// # Errors
    ///
    /// Returns `InterpError::OutOfBounds` for wavelengths outside the grid.
    pub fn efficiency_at(&self, wavelength: f64) -> Result<f64, InterpError> {
        interp(wavelength, &self.wavelengths, &self.efficiencies)
    }

    /// Writes the resampled curve as a two-column CSV.
    pub fn write_csv(&self, path: &Path) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([WAVELENGTH_COLUMN, EFFICIENCY_COLUMN])?;
        for (wavelength, efficiency) in self.wavelengths.iter().zip(self.efficiencies.iter()) {
            writer.write_record([wavelength.to_string(), efficiency.to_string()])?;
        }
        writer.flush()?;
        info!("wrote {} resampled QE points to {}", self.wavelengths.len(), path.display());
        Ok(())
    }
}

fn column_index(
    headers: &csv::StringRecord,
    name: &str,
) -> Result<usize, QeCurveError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| QeCurveError::MissingColumn(name.to_string()))
}

fn parse_field(
    record: &csv::StringRecord,
    col: usize,
    row: usize,
) -> Result<f64, QeCurveError> {
    let field = record.get(col).unwrap_or("");
    field
        .trim()
        .parse()
        // Line numbers are 1-based and row 0 sits under the header line.
        .map_err(|_| QeCurveError::BadNumber(row + 2, field.to_string()))
}
