//! Digitization pipeline from graph image to normalized samples
//!
//! The pipeline runs four stages in a fixed order: segmentation builds a
//! boolean mask of trace-colored pixels, extraction collects their
//! coordinates, aggregation collapses each image column to one bottom-up
//! amplitude, and normalization rescales the amplitudes into [0, 1].
//! Every stage fails fast and its error reaches the caller unmodified.

mod aggregation;
mod extraction;
mod normalization;
mod segmentation;

use image::RgbImage;
use thiserror::Error;

use crate::color::ColorRange;

pub use aggregation::{aggregate, DataPoint};
pub use extraction::{extract, PixelPoint};
pub use normalization::{normalize, Sample};
pub use segmentation::segment;

/// Errors that can occur while digitizing a trace
#[derive(Error, Debug)]
pub enum DigitizeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Color range matched no pixels in the image")]
    EmptyExtraction,

    #[error("Cannot normalize a flat trace: every column aggregates to {0}")]
    DegenerateRange(f64),
}

/// Digitize the trace drawn in a graph image.
///
/// Runs segmentation, extraction, aggregation, and normalization in that
/// order and returns one sample per image column that contained at least one
/// pixel inside `color_range`. Samples are sorted by strictly increasing
/// column index and their amplitudes span exactly [0, 1].
///
/// The call is a pure function of its inputs: it performs no I/O, keeps no
/// state between invocations, and may run concurrently with other calls on
/// other images.
///
/// # Arguments
///
/// * `image` - The decoded source image, read-only for the duration of the call
/// * `color_range` - Inclusive HSV bounds selecting the trace color
///
/// # Errors
///
/// * `DigitizeError::InvalidInput` - The image has zero width or height
/// * `DigitizeError::EmptyExtraction` - No pixel matched the color range
/// * `DigitizeError::DegenerateRange` - All matched columns aggregate to the
///   same amplitude, so the [0, 1] rescale is undefined
pub fn digitize(
    image: &RgbImage,
    color_range: &ColorRange,
) -> Result<Vec<Sample>, DigitizeError> {
    let mask = segment(image, color_range)?;
    let pixels = extract(&mask)?;
    let points = aggregate(&pixels, image.height());
    normalize(&points)
}
