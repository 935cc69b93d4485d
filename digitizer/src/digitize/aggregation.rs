//! Column collapse of extracted trace pixels

use std::collections::BTreeMap;

use super::extraction::PixelPoint;

/// One aggregated sample: a column index and its bottom-up amplitude.
///
/// The amplitude is fractional because a column covered by several pixels
/// (stroke thickness, anti-aliasing) collapses to the mean of their values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    /// Image column the sample came from
    pub x: u32,

    /// Bottom-up amplitude, `image_height - 1 - row` averaged per column
    pub y: f64,
}

/// Collapse extracted pixels to one data point per image column.
///
/// Rows are first flipped bottom-up (`y = image_height - 1 - row`) so that a
/// visually higher trace position yields a larger amplitude. Columns holding
/// several pixels resolve to the arithmetic mean of their amplitudes, which
/// keeps the result stable against the 2-4 pixel tall matches a drawn stroke
/// typically produces. Columns with no matched pixel are left out; no gap
/// filling or interpolation is attempted.
///
/// The output is sorted by ascending column index and each column appears at
/// most once.
pub fn aggregate(pixels: &[PixelPoint], image_height: u32) -> Vec<DataPoint> {
    let mut columns: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for pixel in pixels {
        let y = (image_height - 1 - pixel.row) as f64;
        columns.entry(pixel.column).or_default().push(y);
    }

    columns
        .into_iter()
        .map(|(x, ys)| DataPoint {
            x,
            y: ys.iter().sum::<f64>() / ys.len() as f64,
        })
        .collect()
}
