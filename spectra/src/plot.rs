//! Plot rendering for QE curves and spectra

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::qe_curve::QeCurve;

/// Number of points used to draw the smooth spline curve.
const CURVE_SAMPLES: usize = 1000;

/// Renders a QE curve with measured points, the fitted spline, and a
/// peak annotation.
///
/// # Arguments
///
/// * `curve` - The QE curve to plot
/// * `save_path` - Output image path, format chosen by extension
pub fn render_qe_curve(curve: &QeCurve, save_path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(save_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = curve.min_wavelength();
    let x_max = curve.max_wavelength();
    let max_qe = curve
        .efficiencies()
        .iter()
        .fold(0.0_f64, |a, &b| a.max(b));
    // Flat-zero tables still get a visible axis.
    let y_top = (max_qe * 1.1).max(0.05);

    let mut chart = ChartBuilder::on(&root)
        .caption("CMOS Sensor Quantum Efficiency Curve", ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((x_min - 50.0)..(x_max + 50.0), 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Wavelength (nm)")
        .y_desc("Quantum Efficiency")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .draw()?;

    // Spline values are clamped at zero to match the resampled output.
    let step = (x_max - x_min) / (CURVE_SAMPLES - 1) as f64;
    chart
        .draw_series(LineSeries::new(
            (0..CURVE_SAMPLES).map(|i| {
                let w = x_min + i as f64 * step;
                (w, curve.sample_at(w).max(0.0))
            }),
            &BLUE,
        ))?
        .label("Fitted QE Curve")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(
            curve
                .wavelengths()
                .iter()
                .zip(curve.efficiencies().iter())
                .map(|(&w, &q)| Circle::new((w, q), 4, RED.filled())),
        )?
        .label("Measured Points")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    let (peak_wavelength, peak_qe) = curve.peak();
    chart.draw_series(std::iter::once(Text::new(
        format!("Peak QE: {peak_qe:.2} at {peak_wavelength}nm"),
        (x_min - 40.0, y_top * 0.98),
        ("sans-serif", 18).into_font().color(&BLACK),
    )))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Renders a wavelength/intensity series as a single-line plot.
///
/// # Arguments
///
/// * `wavelengths` - X coordinates in nanometers
/// * `intensities` - Y values, same length as `wavelengths`
/// * `save_path` - Output image path, format chosen by extension
/// * `caption` - Title drawn across the top
/// * `series_label` - Legend entry for the line
/// * `y_desc` - Y axis description
pub fn render_spectrum(
    wavelengths: &[f64],
    intensities: &[f64],
    save_path: &Path,
    caption: &str,
    series_label: &str,
    y_desc: &str,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(save_path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = wavelengths.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let mut x_max = wavelengths.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let y_top = intensities
        .iter()
        .fold(0.0_f64, |a, &b| a.max(b))
        .max(1e-9)
        * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Wavelength (nm)")
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            wavelengths
                .iter()
                .zip(intensities.iter())
                .map(|(&w, &i)| (w, i)),
            &BLUE,
        ))?
        .label(series_label.to_string())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
