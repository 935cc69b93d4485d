//! Trace digitization for plotted graph images
//!
//! This crate recovers a sampled X/Y signal from a raster image of a plotted
//! graph. Pixels belonging to the drawn trace are isolated by an HSV color
//! range, collapsed to one sample per image column, and rescaled so the
//! amplitude spans [0, 1]. The result is suitable for CSV export or for
//! feeding downstream curve fitting.

pub mod color;
pub mod config;
pub mod digitize;
pub mod io;
pub mod plot;

pub use color::{ColorRange, Hsv};
pub use config::DigitizeConfig;
pub use digitize::{digitize, DataPoint, DigitizeError, PixelPoint, Sample};
pub use io::{load_image, write_samples_csv};
pub use plot::render_trace;
