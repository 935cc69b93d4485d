//! Quantum efficiency curve generator
//!
//! Loads a measured QE table, renders the fitted curve with its measured
//! points, and optionally resamples the curve onto a regular wavelength
//! grid for CSV export. A Gaussian dome fit of the table is available for
//! sensors whose response is well approximated by a single peak.

use std::path::PathBuf;

use clap::Parser;
use spectra::plot::render_qe_curve;
use spectra::{fit_gaussian, PeakFitConfig, QeCurve};

/// Wavelengths reported as a quick sanity check of the fitted curve
const SPOT_CHECK_NM: [f64; 3] = [425.0, 575.0, 725.0];

#[derive(Parser, Debug)]
#[command(
    name = "QE Curve Generator",
    about = "Fits and resamples CMOS sensor quantum efficiency tables",
    long_about = None
)]
struct Args {
    /// Input CSV with 'Wavelength (nm)' and 'Quantum Efficiency' columns
    #[arg(long, default_value = "omnivisionQE.csv")]
    input: PathBuf,

    /// Output plot file path
    #[arg(long, default_value = "cmos_qe_curve.png")]
    output_plot: PathBuf,

    /// Write the resampled curve to this CSV path
    #[arg(long)]
    output_csv: Option<PathBuf>,

    /// Wavelength interval in nm for the resampled grid
    #[arg(long, default_value_t = 1.0)]
    interval: f64,

    /// Grid start in nm (default: first measured wavelength)
    #[arg(long)]
    min_wavelength: Option<f64>,

    /// Grid end in nm (default: last measured wavelength)
    #[arg(long)]
    max_wavelength: Option<f64>,

    /// Fit a Gaussian to the measured table and report its parameters
    #[arg(long)]
    fit: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    println!("QE Curve Generator");
    println!("==================");
    println!();

    let curve = QeCurve::from_csv(&args.input)?;
    println!(
        "Loaded {} measured points spanning {}-{} nm from {}",
        curve.wavelengths().len(),
        curve.min_wavelength(),
        curve.max_wavelength(),
        args.input.display()
    );

    let (peak_wavelength, peak_qe) = curve.peak();
    println!("Peak QE: {peak_qe:.2} at {peak_wavelength}nm");

    render_qe_curve(&curve, &args.output_plot)?;
    println!("Plot saved to: {}", args.output_plot.display());

    if let Some(csv_path) = &args.output_csv {
        let resampled =
            curve.resample(args.interval, args.min_wavelength, args.max_wavelength)?;
        resampled.write_csv(csv_path)?;
        println!(
            "Wrote {} resampled points ({} nm interval) to {}",
            resampled.wavelengths.len(),
            args.interval,
            csv_path.display()
        );
    }

    if args.fit {
        let fit = fit_gaussian(
            curve.wavelengths(),
            curve.efficiencies(),
            &PeakFitConfig::default(),
        )?;
        println!();
        println!("Gaussian fit of the measured table:");
        println!("  Amplitude: {:.4}", fit.amplitude);
        println!("  Center:    {:.1} nm", fit.center);
        println!("  FWHM:      {:.1} nm", fit.fwhm());
        println!(
            "  MSE:       {:.3e} after {} iterations",
            fit.mean_squared_error, fit.iterations
        );
    }

    println!();
    println!("Quantum efficiency at spot-check wavelengths:");
    for wavelength in SPOT_CHECK_NM {
        // Spot checks outside the measured range would report raw
        // extrapolation, so they are skipped.
        if wavelength < curve.min_wavelength() || wavelength > curve.max_wavelength() {
            continue;
        }
        println!("  QE at {wavelength}nm: {:.3}", curve.sample_at(wavelength));
    }

    Ok(())
}
