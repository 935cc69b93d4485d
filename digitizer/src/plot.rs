//! Rendering of digitized traces to PNG charts

use std::path::Path;

use plotters::prelude::*;

use crate::digitize::Sample;

/// Render normalized samples as a PNG line chart.
///
/// The x axis spans the sampled columns and the y axis the unit interval.
/// Purely a visualization aid; nothing flows back into the pipeline.
pub fn render_trace(
    samples: &[Sample],
    save_path: &Path,
    caption: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let x_max = samples.last().map(|s| s.x as f64).unwrap_or(1.0);

    let root = BitMapBackend::new(save_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 32).into_font().color(&BLACK))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max.max(1.0), 0.0..1.05)?;

    chart
        .configure_mesh()
        .x_desc("X (pixel column)")
        .y_desc("Normalized Amplitude")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.x as f64, s.y)),
            BLUE,
        ))?
        .label("Digitized trace")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .label_font(("sans-serif", 18))
        .draw()?;

    root.present()?;

    Ok(())
}
