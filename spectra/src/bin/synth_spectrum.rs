//! Synthetic spectrum generator for calibration lamps
//!
//! Reads a NIST Atomic Spectra Database CSV export, broadens every
//! catalogued emission line with a Gaussian profile, and writes the
//! normalized spectrum on a regular wavelength grid. The result stands in
//! for a measured lamp spectrum when tuning wavelength calibration.

use std::path::PathBuf;

use clap::Parser;
use spectra::plot::render_spectrum;
use spectra::{synthesize, LineList, SynthesisConfig};

#[derive(Parser, Debug)]
#[command(
    name = "Spectrum Synthesizer",
    about = "Builds a Gaussian-broadened synthetic spectrum from a NIST line list",
    long_about = None
)]
struct Args {
    /// NIST ASD CSV export with 'obs_wl_air(nm)' and 'intens' columns
    line_list: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "argon_synth_spectrum.csv")]
    output: PathBuf,

    /// Render the synthesized spectrum to this PNG path
    #[arg(long)]
    plot: Option<PathBuf>,

    /// First grid wavelength in nm
    #[arg(long, default_value_t = 200.0)]
    start_nm: f64,

    /// Last grid wavelength in nm (inclusive)
    #[arg(long, default_value_t = 1500.0)]
    end_nm: f64,

    /// Grid spacing in nm
    #[arg(long, default_value_t = 0.1)]
    step_nm: f64,

    /// Full width at half maximum of each line profile in nm
    #[arg(long, default_value_t = 1.0)]
    fwhm_nm: f64,
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
    println!("Spectrum Synthesizer");
    println!("====================");
    println!();

    let lines = LineList::from_nist_csv(&args.line_list)?;
    println!(
        "Loaded {} emission lines from {}",
        lines.len(),
        args.line_list.display()
    );

    let config = SynthesisConfig {
        start_nm: args.start_nm,
        end_nm: args.end_nm,
        step_nm: args.step_nm,
        fwhm_nm: args.fwhm_nm,
    };
    println!(
        "Grid: {}-{} nm in {} nm steps, line FWHM {} nm",
        config.start_nm, config.end_nm, config.step_nm, config.fwhm_nm
    );

    let spectrum = synthesize(&lines, &config)?;
    spectrum.write_csv(&args.output)?;
    println!(
        "Synthetic spectrum ({} points) saved to {}",
        spectrum.wavelengths.len(),
        args.output.display()
    );

    if let Some(plot_path) = &args.plot {
        render_spectrum(
            &spectrum.wavelengths,
            &spectrum.intensities,
            plot_path,
            "Synthetic Spectrum from NIST Line Data",
            "Synthesized spectrum",
            "Normalized Intensity (0-1)",
        )?;
        println!("Plot saved to: {}", plot_path.display());
    }

    Ok(())
}
