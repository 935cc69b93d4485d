//! Quantum efficiency curves and spectral line synthesis
//!
//! This crate handles the spectral side of sensor characterization:
//! resampling digitized quantum efficiency tables onto regular wavelength
//! grids, fitting Gaussian models to QE peaks, synthesizing reference
//! spectra from NIST line lists, and parsing spectrometer capture dumps.

pub mod capture;
pub mod interpolate;
pub mod line_list;
pub mod peak_fit;
pub mod plot;
pub mod qe_curve;
pub mod synthesis;

pub use capture::{parse_capture, CaptureError};
pub use interpolate::{interp, InterpError, QuadraticSpline, SplineError};
pub use line_list::{LineList, LineListError, SpectralLine};
pub use peak_fit::{fit_gaussian, GaussianFit, PeakFitConfig, PeakFitError};
pub use qe_curve::{QeCurve, QeCurveError, ResampledCurve};
pub use synthesis::{synthesize, Spectrum, SynthesisConfig, SynthesisError};
