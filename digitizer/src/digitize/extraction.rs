//! Coordinate extraction from segmentation masks

use ndarray::Array2;

use super::DigitizeError;

/// A masked pixel location, row measured top-down as stored in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPoint {
    /// Column index, 0 at the left edge
    pub column: u32,

    /// Row index, 0 at the top edge
    pub row: u32,
}

/// Collect the coordinates of every `true` cell in the mask.
///
/// The returned points carry no particular ordering; the aggregation stage
/// imposes one. Matching zero pixels is a reportable condition rather than
/// an empty result, since it almost always means the color range does not
/// match the trace actually drawn in the image.
///
/// # Errors
///
/// Returns `DigitizeError::EmptyExtraction` if no cell of the mask is set.
pub fn extract(mask: &Array2<bool>) -> Result<Vec<PixelPoint>, DigitizeError> {
    let mut points = Vec::new();
    for ((row, column), &matched) in mask.indexed_iter() {
        if matched {
            points.push(PixelPoint {
                column: column as u32,
                row: row as u32,
            });
        }
    }

    if points.is_empty() {
        return Err(DigitizeError::EmptyExtraction);
    }

    Ok(points)
}
