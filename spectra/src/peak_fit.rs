//! Gaussian peak fitting
//!
//! Fits the three-parameter model `f(x) = A exp(-(x - mu)^2 / (2 sigma^2))`
//! to sampled data with Levenberg-Marquardt least squares. Useful for
//! characterizing the dome of a QE curve or an isolated emission line.

use nalgebra::{Matrix3, Vector3};
use thiserror::Error;

/// Errors that can occur during peak fitting
#[derive(Error, Debug)]
pub enum PeakFitError {
    #[error("Invalid argument: {0}")]
    ArgumentError(String),

    #[error("Normal equations became singular at iteration {0}")]
    SingularSystem(usize),

    #[error("Fit did not converge within {0} iterations")]
    DidNotConverge(usize),
}

/// Parameters controlling the Levenberg-Marquardt iteration.
#[derive(Debug, Clone)]
pub struct PeakFitConfig {
    /// Maximum number of iterations to perform
    pub max_iterations: usize,

    /// Mean-squared-error improvement below which the fit is converged
    pub convergence_threshold: f64,

    /// Optional (amplitude, center, sigma) starting point. When absent
    /// the guess is derived from the data: the maximum sample, its
    /// position, and a quarter of the x span.
    pub initial_guess: Option<(f64, f64, f64)>,
}

impl Default for PeakFitConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            convergence_threshold: 1e-9,
            initial_guess: None,
        }
    }
}

/// Result of a Gaussian fit containing model parameters and fit quality
#[derive(Debug, Clone)]
pub struct GaussianFit {
    /// Peak amplitude A
    pub amplitude: f64,

    /// Peak center mu, in the same units as the x data
    pub center: f64,

    /// Gaussian width sigma; the sign is not meaningful
    pub sigma: f64,

    /// Mean squared error of the final fit
    pub mean_squared_error: f64,

    /// Number of iterations performed
    pub iterations: usize,
}

impl GaussianFit {
    /// Evaluates the fitted model at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        gaussian(x, self.amplitude, self.center, self.sigma)
    }

    /// Full width at half maximum of the fitted peak.
    pub fn fwhm(&self) -> f64 {
        2.0 * (2.0 * std::f64::consts::LN_2).sqrt() * self.sigma.abs()
    }
}

/// Fits a Gaussian to sampled data with Levenberg-Marquardt
///
/// Each iteration solves the damped normal equations for a parameter
/// step. Steps that reduce the mean squared error are accepted and relax
/// the damping; steps that don't are rejected and increase it. The fit
/// converges when an accepted step improves the error by less than the
/// configured threshold.
///
/// # Arguments
/// * `xs` - Sample positions
/// * `ys` - Sample values, same length as `xs`
/// * `config` - Iteration limits, convergence threshold, and optional starting point
///
/// # Returns
/// * `Result<GaussianFit, PeakFitError>` - Fitted parameters with fit quality metrics
///
/// # Errors
/// * `PeakFitError::ArgumentError` - Inputs are unusable for a three-parameter fit
/// * `PeakFitError::SingularSystem` - The damped normal equations could not be solved
/// * `PeakFitError::DidNotConverge` - No convergence within `max_iterations`
pub fn fit_gaussian(
    xs: &[f64],
    ys: &[f64],
    config: &PeakFitConfig,
) -> Result<GaussianFit, PeakFitError> {
    if xs.len() != ys.len() {
        return Err(PeakFitError::ArgumentError(
            "x and y data must have the same length".to_string(),
        ));
    }
    if xs.len() < 3 {
        return Err(PeakFitError::ArgumentError(
            "Gaussian fit needs at least 3 data points".to_string(),
        ));
    }
    if config.convergence_threshold <= 0.0 {
        return Err(PeakFitError::ArgumentError(
            "Convergence threshold must be positive".to_string(),
        ));
    }

    let (mut amplitude, mut center, mut sigma) = match config.initial_guess {
        Some(guess) => guess,
        None => default_guess(xs, ys)?,
    };

    let mut mse = mean_squared_error(xs, ys, amplitude, center, sigma);
    let mut lambda = 1e-3;
    let mut iterations = 0;

    for i in 0..config.max_iterations {
        iterations = i + 1;

        let mut jtj = Matrix3::zeros();
        let mut jtr = Vector3::zeros();
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let dx = x - center;
            let shape = (-0.5 * (dx / sigma) * (dx / sigma)).exp();
            let residual = y - amplitude * shape;
            let jacobian = Vector3::new(
                shape,
                amplitude * shape * dx / (sigma * sigma),
                amplitude * shape * dx * dx / (sigma * sigma * sigma),
            );
            jtj += jacobian * jacobian.transpose();
            jtr += jacobian * residual;
        }

        // Marquardt damping scales with the curvature of each parameter.
        let mut damped = jtj;
        for k in 0..3 {
            damped[(k, k)] += lambda * jtj[(k, k)].max(1e-12);
        }

        let svd = damped.svd(true, true);
        let delta = svd
            .solve(&jtr, 1e-10)
            .map_err(|_| PeakFitError::SingularSystem(iterations))?;

        let trial_amplitude = amplitude + delta[0];
        let trial_center = center + delta[1];
        let trial_sigma = sigma + delta[2];
        let trial_mse = mean_squared_error(xs, ys, trial_amplitude, trial_center, trial_sigma);

        if trial_mse <= mse {
            let improvement = mse - trial_mse;
            amplitude = trial_amplitude;
            center = trial_center;
            sigma = trial_sigma;
            mse = trial_mse;
            lambda = (lambda * 0.5).max(1e-12);

            if improvement < config.convergence_threshold {
                return Ok(GaussianFit {
                    amplitude,
                    center,
                    sigma,
                    mean_squared_error: mse,
                    iterations,
                });
            }
        } else {
            lambda *= 10.0;
        }
    }

    Err(PeakFitError::DidNotConverge(config.max_iterations))
}

/// Starting point from the data: the largest sample sets the amplitude
/// and center, and the width starts at a quarter of the x span.
fn default_guess(xs: &[f64], ys: &[f64]) -> Result<(f64, f64, f64), PeakFitError> {
    let mut best = 0;
    for i in 1..ys.len() {
        if ys[i] > ys[best] {
            best = i;
        }
    }

    let min_x = xs.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max_x = xs.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    if max_x <= min_x {
        return Err(PeakFitError::ArgumentError(
            "x values must span a nonzero range".to_string(),
        ));
    }

    Ok((ys[best], xs[best], (max_x - min_x) / 4.0))
}

fn gaussian(x: f64, amplitude: f64, center: f64, sigma: f64) -> f64 {
    let z = (x - center) / sigma;
    amplitude * (-0.5 * z * z).exp()
}

fn mean_squared_error(xs: &[f64], ys: &[f64], amplitude: f64, center: f64, sigma: f64) -> f64 {
    let mut sum = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let residual = y - gaussian(x, amplitude, center, sigma);
        sum += residual * residual;
    }
    sum / xs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_gaussian(amplitude: f64, center: f64, sigma: f64) -> (Vec<f64>, Vec<f64>) {
        let xs: Vec<f64> = (0..=60).map(|i| 300.0 + 10.0 * i as f64).collect();
        let ys = xs
            .iter()
            .map(|&x| gaussian(x, amplitude, center, sigma))
            .collect();
        (xs, ys)
    }

    #[test]
    fn test_recovers_exact_gaussian() {
        let (xs, ys) = sample_gaussian(0.8, 550.0, 60.0);
        let fit = fit_gaussian(&xs, &ys, &PeakFitConfig::default()).unwrap();

        assert_relative_eq!(fit.amplitude, 0.8, epsilon = 1e-3);
        assert_relative_eq!(fit.center, 550.0, epsilon = 1e-2);
        assert_relative_eq!(fit.sigma.abs(), 60.0, epsilon = 1e-1);
        assert!(fit.mean_squared_error < 1e-8);
    }

    #[test]
    fn test_recovers_center_between_samples() {
        let (xs, ys) = sample_gaussian(1.2, 547.3, 45.0);
        let fit = fit_gaussian(&xs, &ys, &PeakFitConfig::default()).unwrap();
        assert_relative_eq!(fit.center, 547.3, epsilon = 1e-2);
    }

    #[test]
    fn test_custom_initial_guess() {
        let (xs, ys) = sample_gaussian(0.6, 520.0, 40.0);
        let config = PeakFitConfig {
            initial_guess: Some((1.0, 500.0, 50.0)),
            ..Default::default()
        };
        let fit = fit_gaussian(&xs, &ys, &config).unwrap();
        assert_relative_eq!(fit.amplitude, 0.6, epsilon = 1e-3);
        assert_relative_eq!(fit.center, 520.0, epsilon = 1e-2);
    }

    #[test]
    fn test_tolerates_noise() {
        let (xs, mut ys) = sample_gaussian(1.0, 550.0, 60.0);
        // Deterministic low-level wiggle standing in for shot noise.
        for (i, y) in ys.iter_mut().enumerate() {
            *y += 0.005 * (i as f64 * 1.7).sin();
        }
        let fit = fit_gaussian(&xs, &ys, &PeakFitConfig::default()).unwrap();
        assert_relative_eq!(fit.center, 550.0, epsilon = 1.0);
        assert_relative_eq!(fit.amplitude, 1.0, epsilon = 0.05);
        assert!(fit.mean_squared_error < 1e-4);
    }

    #[test]
    fn test_exact_start_converges_immediately() {
        let (xs, ys) = sample_gaussian(0.5, 500.0, 30.0);
        let config = PeakFitConfig {
            initial_guess: Some((0.5, 500.0, 30.0)),
            ..Default::default()
        };
        let fit = fit_gaussian(&xs, &ys, &config).unwrap();
        assert_eq!(fit.iterations, 1);
        assert!(fit.mean_squared_error < 1e-15);
    }

    #[test]
    fn test_fwhm_relation() {
        let fit = GaussianFit {
            amplitude: 1.0,
            center: 0.0,
            sigma: 10.0,
            mean_squared_error: 0.0,
            iterations: 0,
        };
        assert_relative_eq!(fit.fwhm(), 23.548200450309493, epsilon = 1e-9);
    }

    #[test]
    fn test_evaluate_matches_model() {
        let fit = GaussianFit {
            amplitude: 2.0,
            center: 5.0,
            sigma: 1.0,
            mean_squared_error: 0.0,
            iterations: 0,
        };
        assert_relative_eq!(fit.evaluate(5.0), 2.0);
        assert_relative_eq!(fit.evaluate(6.0), 2.0 * (-0.5_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_mismatched_lengths() {
        let result = fit_gaussian(&[1.0, 2.0, 3.0], &[1.0, 2.0], &PeakFitConfig::default());
        assert!(matches!(result, Err(PeakFitError::ArgumentError(_))));
    }

    #[test]
    fn test_too_few_points() {
        let result = fit_gaussian(&[1.0, 2.0], &[1.0, 2.0], &PeakFitConfig::default());
        assert!(matches!(result, Err(PeakFitError::ArgumentError(_))));
    }

    #[test]
    fn test_degenerate_x_span() {
        let result = fit_gaussian(
            &[5.0, 5.0, 5.0],
            &[1.0, 2.0, 3.0],
            &PeakFitConfig::default(),
        );
        assert!(matches!(result, Err(PeakFitError::ArgumentError(_))));
    }
}
