//! NIST line list to synthetic spectrum tests

use std::io::Write;
use std::path::PathBuf;

use approx::assert_relative_eq;
use spectra::{synthesize, LineList, SynthesisConfig};

/// Argon-like NIST export with spreadsheet quoting and junk rows
fn write_nist_export() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("argon.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        "element,obs_wl_air(nm),intens\n\
         Ar I,=\"763.5106\",=\"30000\"\n\
         Ar I,=\"811.5311\",=\"25000\"\n\
         Ar I,,=\"500\"\n\
         Ar I,=\"750.3869\",\n"
    )
    .unwrap();
    (dir, path)
}

#[test]
fn test_nist_export_to_normalized_spectrum() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (_dir, path) = write_nist_export();
    let lines = LineList::from_nist_csv(&path).unwrap();

    // The row without a wavelength is dropped; the one without an
    // intensity survives at 1.0.
    assert_eq!(lines.len(), 3);
    assert_relative_eq!(lines.lines()[2].wavelength, 750.3869);
    assert_relative_eq!(lines.lines()[2].intensity, 1.0);

    let config = SynthesisConfig {
        start_nm: 700.0,
        end_nm: 900.0,
        step_nm: 0.1,
        fwhm_nm: 1.0,
    };
    let spectrum = synthesize(&lines, &config).unwrap();

    assert_eq!(spectrum.wavelengths.len(), 2001);

    // Unit peak lands on the grid point nearest the strongest line.
    let peak_idx = spectrum
        .intensities
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| i)
        .unwrap();
    assert_relative_eq!(spectrum.intensities[peak_idx], 1.0);
    assert!((spectrum.wavelengths[peak_idx] - 763.5106).abs() <= config.step_nm);

    // The secondary line keeps its catalogued intensity ratio.
    let at_secondary = spectrum
        .wavelengths
        .iter()
        .position(|&w| (w - 811.5).abs() < 1e-9)
        .unwrap();
    assert_relative_eq!(
        spectrum.intensities[at_secondary],
        25000.0 / 30000.0,
        epsilon = 0.01
    );

    // Everything is normalized and non-negative.
    assert!(spectrum
        .intensities
        .iter()
        .all(|&i| (0.0..=1.0).contains(&i)));
}

#[test]
fn test_spectrum_csv_export() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (dir, path) = write_nist_export();
    let lines = LineList::from_nist_csv(&path).unwrap();
    let config = SynthesisConfig {
        start_nm: 760.0,
        end_nm: 770.0,
        step_nm: 0.5,
        fwhm_nm: 1.0,
    };
    let spectrum = synthesize(&lines, &config).unwrap();

    let out_path = dir.path().join("spectrum.csv");
    spectrum.write_csv(&out_path).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines_out: Vec<&str> = contents.lines().collect();
    assert_eq!(lines_out[0], "Wavelength (nm),Normalized Intensity");
    assert_eq!(lines_out.len(), spectrum.wavelengths.len() + 1);
    assert!(lines_out[1].starts_with("760,"));
}
