//! HSV color representation and trace color ranges
//!
//! Trace pixels are matched in HSV space rather than RGB because hue is
//! stable across the brightness gradients and anti-aliased edges found in
//! rendered plot images. Channels use the 8-bit convention common in image
//! processing pipelines: hue in half-degrees [0, 179], saturation and value
//! in [0, 255].

/// A color in HSV space, 8-bit channels.
///
/// Hue is stored in half-degrees so the full circle fits a `u8`: 0 is red,
/// 60 is green, 120 is blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    /// Hue in half-degrees (0-179)
    pub hue: u8,

    /// Saturation (0-255)
    pub saturation: u8,

    /// Value, i.e. brightness (0-255)
    pub value: u8,
}

impl Hsv {
    /// Create an HSV color from raw channel values.
    pub fn new(hue: u8, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Convert an 8-bit RGB triple to HSV.
    ///
    /// Uses the standard hexagonal hue derivation: the dominant channel
    /// selects a 60-degree sector and the difference of the remaining two,
    /// scaled by chroma, positions the hue within it. Achromatic pixels
    /// (zero chroma) report hue 0.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let rf = r as f64 / 255.0;
        let gf = g as f64 / 255.0;
        let bf = b as f64 / 255.0;

        let max = rf.max(gf.max(bf));
        let min = rf.min(gf.min(bf));
        let chroma = max - min;

        let hue_degrees = if chroma <= f64::EPSILON {
            0.0
        } else {
            let (base_difference, sector_offset) = if max == rf {
                (gf - bf, 0.0)
            } else if max == gf {
                (bf - rf, 2.0)
            } else {
                (rf - gf, 4.0)
            };

            let mut degrees = (base_difference / chroma + sector_offset) * 60.0;
            if degrees < 0.0 {
                degrees += 360.0;
            }
            degrees
        };

        // Half-degree quantization; 360 wraps back to 0
        let mut hue = (hue_degrees / 2.0).round();
        if hue >= 180.0 {
            hue -= 180.0;
        }

        let saturation = if max <= f64::EPSILON {
            0.0
        } else {
            chroma / max
        };

        Self {
            hue: hue as u8,
            saturation: (saturation * 255.0).round() as u8,
            value: (max * 255.0).round() as u8,
        }
    }
}

/// An inclusive bound in HSV space used to select trace pixels.
///
/// A color matches when all three channels lie within [lower, upper]
/// simultaneously. Bounds do not wrap around the hue circle; a range that
/// straddles red (e.g. 170 through 10) must be expressed as two ranges by
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    /// Inclusive lower bound for each channel
    pub lower: Hsv,

    /// Inclusive upper bound for each channel
    pub upper: Hsv,
}

impl ColorRange {
    /// Create a range from explicit lower and upper bounds.
    pub fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    /// Stock range matching the blue traces produced by common plotting
    /// packages, saturated enough to exclude background and gridlines.
    pub fn blue_trace() -> Self {
        Self {
            lower: Hsv::new(100, 150, 50),
            upper: Hsv::new(140, 255, 255),
        }
    }

    /// Check whether a color falls inside this range, inclusive on all
    /// three channels.
    pub fn contains(&self, color: Hsv) -> bool {
        color.hue >= self.lower.hue
            && color.hue <= self.upper.hue
            && color.saturation >= self.lower.saturation
            && color.saturation <= self.upper.saturation
            && color.value >= self.lower.value
            && color.value <= self.upper.value
    }
}
