//! Digitize a plotted trace from a graph image into normalized CSV samples
//!
//! Reads an image of a plotted graph, isolates the trace by an HSV color
//! range (the stock range matches common blue plot lines), collapses it to
//! one sample per image column, and writes the [0, 1] normalized result as
//! CSV. Optionally renders a PNG of the recovered trace.

use std::path::PathBuf;

use clap::Parser;
use digitizer::{
    digitize, load_image, render_trace, write_samples_csv, ColorRange, DigitizeConfig, Hsv,
};

#[derive(Parser, Debug)]
#[command(
    name = "Graph Digitizer",
    about = "Recovers normalized X/Y samples from an image of a plotted graph",
    long_about = None
)]
struct Args {
    /// Path to the source graph image
    image_path: PathBuf,

    /// Output CSV path (default: normalized_graph_data.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render the digitized trace to this PNG path
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Lower HSV bound for the trace color as hue,saturation,value
    #[arg(long, value_parser = parse_hsv)]
    lower: Option<Hsv>,

    /// Upper HSV bound for the trace color as hue,saturation,value
    #[arg(long, value_parser = parse_hsv)]
    upper: Option<Hsv>,
}

/// Parse an HSV triple like `100,150,50` with hue in half-degrees
fn parse_hsv(s: &str) -> Result<Hsv, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected hue,saturation,value but got '{s}'"));
    }

    let channel = |text: &str, name: &str| -> Result<u8, String> {
        text.trim()
            .parse::<u8>()
            .map_err(|e| format!("bad {name} component '{text}': {e}"))
    };

    let hue = channel(parts[0], "hue")?;
    if hue > 179 {
        return Err(format!("hue must be 0-179 (half-degrees), got {hue}"));
    }

    Ok(Hsv::new(
        hue,
        channel(parts[1], "saturation")?,
        channel(parts[2], "value")?,
    ))
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
    let defaults = DigitizeConfig::default();
    let config = DigitizeConfig {
        color_range: ColorRange::new(
            args.lower.unwrap_or(defaults.color_range.lower),
            args.upper.unwrap_or(defaults.color_range.upper),
        ),
        output_path: args.output.unwrap_or(defaults.output_path),
    };

    println!("Graph Digitizer");
    println!("===============");
    println!();
    println!(
        "Trace color range: H {}-{}, S {}-{}, V {}-{}",
        config.color_range.lower.hue,
        config.color_range.upper.hue,
        config.color_range.lower.saturation,
        config.color_range.upper.saturation,
        config.color_range.lower.value,
        config.color_range.upper.value,
    );

    let image = load_image(&args.image_path)?;
    println!(
        "Loaded {} ({}x{} px)",
        args.image_path.display(),
        image.width(),
        image.height()
    );

    let samples = digitize(&image, &config.color_range)?;
    println!("Digitized {} samples", samples.len());

    write_samples_csv(&config.output_path, &samples)?;
    println!("Wrote {}", config.output_path.display());

    if let Some(plot_path) = &args.plot {
        render_trace(&samples, plot_path, "Digitized Trace")?;
        println!("Plot saved to: {}", plot_path.display());
    }

    Ok(())
}
