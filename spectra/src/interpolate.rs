//! Interpolation over tabulated curves.
//!
//! Two interpolants cover the crate's needs:
//!
//! - [`interp`] performs plain linear interpolation with binary search,
//!   suitable for querying regular tables like resampled curves
//! - [`QuadraticSpline`] is a piecewise-quadratic fit for smooth resampling:
//!   it passes through every input point exactly, keeps value and first
//!   derivative continuous at knots, and extrapolates queries outside the
//!   knot range with the nearest end segment's polynomial
//!
//! Linear tables are reproduced exactly by both, so the spline degrades
//! gracefully when the underlying data has no curvature.

use thiserror::Error;

/// Errors that can occur during linear interpolation.
#[derive(Error, Debug)]
pub enum InterpError {
    #[error("Value {0} is out of bounds for interpolation range [{1}, {2}]")]
    OutOfBounds(f64, f64, f64),
    #[error("Input vectors must have at least 2 points")]
    InsufficientData,
    #[error("Input vectors must have the same length")]
    MismatchedLengths,
    #[error("X values must be sorted in ascending order")]
    UnsortedData,
}

/// Performs linear interpolation on 1D data using binary search.
///
/// # Arguments
///
/// * `x` - The x-coordinate at which to interpolate
/// * `xs` - Array of x-coordinates, strictly ascending
/// * `ys` - Array of corresponding y-values, same length as `xs`
///
/// # Examples
///
/// ```rust
/// use spectra::interpolate::interp;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// // Between (1,1) and (2,4)
/// assert_eq!(interp(1.5, &xs, &ys)?, 2.5);
///
/// // Exact match at a knot
/// assert_eq!(interp(2.0, &xs, &ys)?, 4.0);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// * `InterpError::OutOfBounds` - `x` lies outside `[xs[0], xs[n-1]]`
/// * `InterpError::InsufficientData` - Fewer than 2 data points provided
/// * `InterpError::MismatchedLengths` - `xs` and `ys` differ in length
/// * `InterpError::UnsortedData` - `xs` is not strictly ascending
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, InterpError> {
    if xs.len() != ys.len() {
        return Err(InterpError::MismatchedLengths);
    }

    if xs.len() < 2 {
        return Err(InterpError::InsufficientData);
    }

    for i in 1..xs.len() {
        if xs[i] <= xs[i - 1] {
            return Err(InterpError::UnsortedData);
        }
    }

    let min_x = xs[0];
    let max_x = xs[xs.len() - 1];
    if x < min_x || x > max_x {
        return Err(InterpError::OutOfBounds(x, min_x, max_x));
    }

    let idx = match xs.binary_search_by(|probe| probe.partial_cmp(&x).unwrap()) {
        Ok(exact_idx) => return Ok(ys[exact_idx]),
        Err(insert_idx) => insert_idx,
    };

    let x1 = xs[idx - 1];
    let x2 = xs[idx];
    let t = (x - x1) / (x2 - x1);
    Ok(ys[idx - 1] + t * (ys[idx] - ys[idx - 1]))
}

/// Errors that can occur while constructing a spline.
#[derive(Error, Debug)]
pub enum SplineError {
    #[error("Knot and value vectors must have the same length")]
    MismatchedLengths,
    #[error("Quadratic spline requires at least 3 points")]
    InsufficientData,
    #[error("Knot positions must be strictly ascending")]
    UnsortedData,
}

/// Piecewise-quadratic interpolant through a set of knots.
///
/// On segment `i` (between knots `x[i]` and `x[i+1]`) the spline evaluates
///
/// ```text
/// q_i(x) = y[i] + b[i] (x - x[i]) + c[i] (x - x[i])^2
/// ```
///
/// Coefficients are chosen so that each segment hits both of its knots and
/// the first derivative matches across segment boundaries. The first
/// segment is seeded with its secant slope, which makes it exactly linear
/// and anchors the derivative recurrence.
#[derive(Debug, Clone)]
pub struct QuadraticSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Linear coefficient per segment.
    b: Vec<f64>,
    /// Quadratic coefficient per segment.
    c: Vec<f64>,
}

impl QuadraticSpline {
    /// Builds a spline through the given points.
    ///
    /// # Arguments
    ///
    /// * `xs` - Knot positions, strictly ascending
    /// * `ys` - Values at each knot, same length as `xs`
    ///
    /// # Errors
    ///
    /// * `SplineError::MismatchedLengths` - `xs` and `ys` differ in length
    /// * `SplineError::InsufficientData` - Fewer than 3 points provided
    /// * `SplineError::UnsortedData` - `xs` is not strictly ascending
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        if xs.len() != ys.len() {
            return Err(SplineError::MismatchedLengths);
        }

        if xs.len() < 3 {
            return Err(SplineError::InsufficientData);
        }

        for i in 1..xs.len() {
            if xs[i] <= xs[i - 1] {
                return Err(SplineError::UnsortedData);
            }
        }

        let segments = xs.len() - 1;
        let mut b = Vec::with_capacity(segments);
        let mut c = Vec::with_capacity(segments);

        // Seeding with the first secant slope zeroes the first quadratic
        // coefficient; each later slope follows from C1 continuity.
        let mut slope = (ys[1] - ys[0]) / (xs[1] - xs[0]);
        for i in 0..segments {
            let h = xs[i + 1] - xs[i];
            let dy = ys[i + 1] - ys[i];
            b.push(slope);
            c.push((dy - slope * h) / (h * h));
            slope = 2.0 * dy / h - slope;
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            b,
            c,
        })
    }

    /// Evaluates the spline at `x`.
    ///
    /// Queries outside the knot range extrapolate using the nearest end
    /// segment's polynomial.
    pub fn eval(&self, x: f64) -> f64 {
        let last_segment = self.b.len() - 1;
        let idx = match self
            .xs
            .binary_search_by(|probe| probe.partial_cmp(&x).unwrap())
        {
            Ok(i) => i.min(last_segment),
            Err(0) => 0,
            Err(i) => (i - 1).min(last_segment),
        };

        let dx = x - self.xs[idx];
        self.ys[idx] + self.b[idx] * dx + self.c[idx] * dx * dx
    }

    /// Lowest knot position.
    pub fn min_x(&self) -> f64 {
        self.xs[0]
    }

    /// Highest knot position.
    pub fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interp_exact_and_between() {
        let xs = vec![1.0, 2.0, 3.0];
        let ys = vec![10.0, 20.0, 40.0];
        assert_eq!(interp(2.0, &xs, &ys).unwrap(), 20.0);
        assert_eq!(interp(1.5, &xs, &ys).unwrap(), 15.0);
        assert_eq!(interp(2.5, &xs, &ys).unwrap(), 30.0);
    }

    #[test]
    fn test_interp_out_of_bounds() {
        let xs = vec![1.0, 2.0, 3.0];
        let ys = vec![10.0, 20.0, 30.0];
        assert!(matches!(
            interp(0.5, &xs, &ys),
            Err(InterpError::OutOfBounds(_, _, _))
        ));
        assert!(matches!(
            interp(3.5, &xs, &ys),
            Err(InterpError::OutOfBounds(_, _, _))
        ));
    }

    #[test]
    fn test_interp_rejects_bad_tables() {
        assert!(matches!(
            interp(1.5, &[1.0, 2.0, 3.0], &[10.0, 20.0]),
            Err(InterpError::MismatchedLengths)
        ));
        assert!(matches!(
            interp(1.0, &[1.0], &[10.0]),
            Err(InterpError::InsufficientData)
        ));
        assert!(matches!(
            interp(1.5, &[2.0, 1.0, 3.0], &[20.0, 10.0, 30.0]),
            Err(InterpError::UnsortedData)
        ));
    }

    #[test]
    fn test_reproduces_knots() {
        let xs = vec![0.0, 1.0, 3.0, 4.5];
        let ys = vec![2.0, -1.0, 0.5, 3.0];
        let spline = QuadraticSpline::new(&xs, &ys).unwrap();
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(spline.eval(x), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_linear_data_stays_linear() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![1.0, 3.0, 5.0, 7.0];
        let spline = QuadraticSpline::new(&xs, &ys).unwrap();
        assert_relative_eq!(spline.eval(0.5), 2.0, epsilon = 1e-12);
        assert_relative_eq!(spline.eval(2.25), 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_curvature_between_knots() {
        // A dip to zero then a flat section forces the middle segment to
        // overshoot below zero, which downstream consumers must handle.
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![1.0, 0.0, 0.0];
        let spline = QuadraticSpline::new(&xs, &ys).unwrap();
        assert_relative_eq!(spline.eval(1.5), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_value_continuity_at_knots() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 2.0, 1.0, 4.0];
        let spline = QuadraticSpline::new(&xs, &ys).unwrap();
        for &x in &xs[1..3] {
            let below = spline.eval(x - 1e-9);
            let above = spline.eval(x + 1e-9);
            assert_relative_eq!(below, above, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_extrapolation_uses_end_segments() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![1.0, 3.0, 5.0, 7.0];
        let spline = QuadraticSpline::new(&xs, &ys).unwrap();
        // Linear data extrapolates along the same line in both directions.
        assert_relative_eq!(spline.eval(-1.0), -1.0, epsilon = 1e-12);
        assert_relative_eq!(spline.eval(4.0), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mismatched_lengths() {
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![1.0, 2.0];
        assert!(matches!(
            QuadraticSpline::new(&xs, &ys),
            Err(SplineError::MismatchedLengths)
        ));
    }

    #[test]
    fn test_insufficient_data() {
        let xs = vec![0.0, 1.0];
        let ys = vec![1.0, 2.0];
        assert!(matches!(
            QuadraticSpline::new(&xs, &ys),
            Err(SplineError::InsufficientData)
        ));
    }

    #[test]
    fn test_unsorted_data() {
        let xs = vec![0.0, 2.0, 1.0];
        let ys = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            QuadraticSpline::new(&xs, &ys),
            Err(SplineError::UnsortedData)
        ));
    }
}
