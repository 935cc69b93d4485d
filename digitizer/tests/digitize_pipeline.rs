//! End-to-end digitization tests on synthetic graph images

use approx::assert_relative_eq;
use digitizer::{digitize, write_samples_csv, ColorRange, DigitizeError, Hsv};
use image::{Rgb, RgbImage};

/// Paint trace pixels at the given (column, row) locations on a white canvas
fn create_trace_image(width: u32, height: u32, trace: &[(u32, u32)]) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for &(column, row) in trace {
        image.put_pixel(column, row, Rgb([0, 0, 255]));
    }
    image
}

#[test]
fn test_columns_collapse_and_normalize() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Column 0 has a two pixel thick stroke at rows 2 and 4, column 1 a
    // single pixel at row 9; columns 2 and 3 stay empty. With height 10 the
    // bottom-up amplitudes are (7+5)/2 = 6 and 0.
    let image = create_trace_image(4, 10, &[(0, 2), (0, 4), (1, 9)]);

    let samples = digitize(&image, &ColorRange::blue_trace()).unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].x, 0);
    assert_relative_eq!(samples[0].y, 1.0);
    assert_eq!(samples[1].x, 1);
    assert_relative_eq!(samples[1].y, 0.0);
}

#[test]
fn test_single_pixel_is_degenerate() {
    let image = create_trace_image(10, 10, &[(3, 2)]);

    let result = digitize(&image, &ColorRange::blue_trace());

    // The lone pixel aggregates to amplitude 7 and min == max
    assert!(matches!(result, Err(DigitizeError::DegenerateRange(y)) if y == 7.0));
}

#[test]
fn test_no_matching_pixels() {
    let mut image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
    image.put_pixel(5, 5, Rgb([255, 0, 0]));

    let result = digitize(&image, &ColorRange::blue_trace());
    assert!(matches!(result, Err(DigitizeError::EmptyExtraction)));
}

#[test]
fn test_digitize_is_idempotent() {
    let trace: Vec<(u32, u32)> = (0..20).map(|c| (c, 5 + (c % 7))).collect();
    let image = create_trace_image(20, 20, &trace);
    let range = ColorRange::blue_trace();

    let first = digitize(&image, &range).unwrap();
    let second = digitize(&image, &range).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_normalization_bounds_on_ramp() {
    // A descending diagonal stroke: bottom-up amplitude rises with column
    let trace: Vec<(u32, u32)> = (0..30).map(|c| (c, 31 - c)).collect();
    let image = create_trace_image(32, 32, &trace);

    let samples = digitize(&image, &ColorRange::blue_trace()).unwrap();

    assert_eq!(samples.len(), 30);
    for sample in &samples {
        assert!(sample.y >= 0.0 && sample.y <= 1.0);
    }
    assert!(samples.iter().any(|s| s.y == 0.0));
    assert!(samples.iter().any(|s| s.y == 1.0));

    // Strictly increasing x, no duplicates
    for pair in samples.windows(2) {
        assert!(pair[0].x < pair[1].x);
    }
}

#[test]
fn test_range_bounds_are_inclusive_end_to_end() {
    let image = create_trace_image(4, 4, &[(0, 0), (2, 3)]);
    let blue = Hsv::from_rgb(0, 0, 255);

    // A range pinched to exactly the trace color still matches it
    let exact = ColorRange::new(blue, blue);
    let samples = digitize(&image, &exact);
    assert!(samples.is_ok());

    // One hue unit away matches nothing
    let shifted = ColorRange::new(
        Hsv::new(blue.hue + 1, blue.saturation, blue.value),
        Hsv::new(blue.hue + 1, blue.saturation, blue.value),
    );
    let result = digitize(&image, &shifted);
    assert!(matches!(result, Err(DigitizeError::EmptyExtraction)));
}

#[test]
fn test_csv_export_of_digitized_trace() {
    let _ = env_logger::builder().is_test(true).try_init();

    let image = create_trace_image(4, 10, &[(0, 2), (0, 4), (1, 9)]);
    let samples = digitize(&image, &ColorRange::blue_trace()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.csv");
    write_samples_csv(&path, &samples).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "X,Normalized Amplitude");
    assert_eq!(lines.len(), samples.len() + 1);
    assert_eq!(lines[1], "0,1");
}
