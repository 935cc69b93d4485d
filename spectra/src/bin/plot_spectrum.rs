//! Spectrometer capture plotter
//!
//! Reads a raw capture dump, recovers the wavelength/intensity pairs that
//! follow the spectral data marker, and renders them as a line chart.

use std::path::PathBuf;

use clap::Parser;
use spectra::parse_capture;
use spectra::plot::render_spectrum;

#[derive(Parser, Debug)]
#[command(
    name = "Capture Plotter",
    about = "Renders a spectrometer capture dump as a line chart",
    long_about = None
)]
struct Args {
    /// Capture file with a '>>>>>Begin Spectral Data<<<<<' data section
    capture_path: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "spectrum_capture.png")]
    output: PathBuf,

    /// Chart title
    #[arg(long, default_value = "Emission Spectrum")]
    caption: String,
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
    println!("Capture Plotter");
    println!("===============");
    println!();

    let (wavelengths, intensities) = parse_capture(&args.capture_path)?;
    println!(
        "Parsed {} samples spanning {:.2}-{:.2} nm from {}",
        wavelengths.len(),
        wavelengths.first().copied().unwrap_or(0.0),
        wavelengths.last().copied().unwrap_or(0.0),
        args.capture_path.display()
    );

    let mut peak = 0;
    for i in 1..intensities.len() {
        if intensities[i] > intensities[peak] {
            peak = i;
        }
    }
    println!(
        "Peak intensity {:.0} counts at {:.2} nm",
        intensities[peak], wavelengths[peak]
    );

    render_spectrum(
        &wavelengths,
        &intensities,
        &args.output,
        &args.caption,
        "Captured spectrum",
        "Intensity (counts)",
    )?;
    println!("Plot saved to: {}", args.output.display());

    Ok(())
}
