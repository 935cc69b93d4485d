//! Explicit configuration for digitization runs

use std::path::PathBuf;

use crate::color::ColorRange;

/// Settings for one digitization run.
///
/// Every default the tool relies on lives in this structure rather than in
/// module-level constants, so callers can inspect and override the full
/// configuration in one place.
#[derive(Debug, Clone)]
pub struct DigitizeConfig {
    /// Inclusive HSV bounds selecting the trace color
    pub color_range: ColorRange,

    /// Destination for the normalized sample CSV
    pub output_path: PathBuf,
}

impl Default for DigitizeConfig {
    fn default() -> Self {
        Self {
            color_range: ColorRange::blue_trace(),
            output_path: PathBuf::from("normalized_graph_data.csv"),
        }
    }
}
