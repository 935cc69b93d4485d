//! Color segmentation of trace pixels

use image::RgbImage;
use ndarray::Array2;

use super::DigitizeError;
use crate::color::{ColorRange, Hsv};

/// Build a boolean mask of the pixels whose color falls inside `range`.
///
/// Each pixel is converted to HSV before the comparison; a pixel is marked
/// `true` when all three channels lie within the inclusive bounds
/// simultaneously. The mask is indexed `[row, column]` to match the image's
/// top-down storage order.
///
/// # Errors
///
/// Returns `DigitizeError::InvalidInput` if the image has zero width or
/// height.
pub fn segment(image: &RgbImage, range: &ColorRange) -> Result<Array2<bool>, DigitizeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(DigitizeError::InvalidInput(format!(
            "image must have nonzero dimensions, got {width}x{height}"
        )));
    }

    let mut mask = Array2::from_elem((height as usize, width as usize), false);
    for (x, y, pixel) in image.enumerate_pixels() {
        let image::Rgb([r, g, b]) = *pixel;
        mask[[y as usize, x as usize]] = range.contains(Hsv::from_rgb(r, g, b));
    }

    Ok(mask)
}
