//! Amplitude normalization into the unit interval

use super::aggregation::DataPoint;
use super::DigitizeError;

/// A digitized sample with its amplitude rescaled into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Image column the sample came from
    pub x: u32,

    /// Amplitude linearly rescaled so the observed extrema map to 0 and 1
    pub y: f64,
}

/// Rescale aggregated amplitudes so the observed minimum maps to 0 and the
/// observed maximum to 1.
///
/// Column indices pass through unchanged. An empty input yields an empty
/// output.
///
/// # Errors
///
/// Returns `DigitizeError::DegenerateRange` when all amplitudes are equal
/// (a flat or single-point trace); the rescale denominator would be zero and
/// the caller must pick its own policy for that case.
pub fn normalize(points: &[DataPoint]) -> Result<Vec<Sample>, DigitizeError> {
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    if max_y == min_y {
        return Err(DigitizeError::DegenerateRange(min_y));
    }

    let span = max_y - min_y;
    Ok(points
        .iter()
        .map(|p| Sample {
            x: p.x,
            y: (p.y - min_y) / span,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extrema_map_to_unit_bounds() {
        let points = vec![
            DataPoint { x: 0, y: 6.0 },
            DataPoint { x: 1, y: 0.0 },
        ];

        let samples = normalize(&points).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].x, 0);
        assert_relative_eq!(samples[0].y, 1.0);
        assert_eq!(samples[1].x, 1);
        assert_relative_eq!(samples[1].y, 0.0);
    }

    #[test]
    fn test_interior_values_scale_linearly() {
        let points = vec![
            DataPoint { x: 0, y: 2.0 },
            DataPoint { x: 1, y: 4.0 },
            DataPoint { x: 2, y: 10.0 },
        ];

        let samples = normalize(&points).unwrap();

        assert_relative_eq!(samples[0].y, 0.0);
        assert_relative_eq!(samples[1].y, 0.25);
        assert_relative_eq!(samples[2].y, 1.0);
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let points = vec![DataPoint { x: 3, y: 7.0 }];
        let result = normalize(&points);
        assert!(matches!(result, Err(DigitizeError::DegenerateRange(y)) if y == 7.0));
    }

    #[test]
    fn test_flat_trace_is_degenerate() {
        let points = vec![
            DataPoint { x: 0, y: 5.0 },
            DataPoint { x: 1, y: 5.0 },
            DataPoint { x: 2, y: 5.0 },
        ];

        let result = normalize(&points);
        assert!(matches!(result, Err(DigitizeError::DegenerateRange(y)) if y == 5.0));
    }
}
