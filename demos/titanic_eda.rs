#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Titanic-style EDA walkthrough.
//!
//! Prints the dataset overview, then renders a survival heatmap and an age
//! box plot as PNG and SVG files.
//!
//! Run with:
//! ```bash
//! RUST_LOG=trueno_eda=debug cargo run --example titanic_eda -- [titanic.csv] [out_dir]
//! ```
//!
//! Without a CSV argument a small built-in passenger sample is used. Fonts come
//! from the configuration file (`TRUENO_EDA_CONFIG`); without one, figures are
//! rasterized without text and the SVG output carries the labels.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trueno_eda::prelude::*;

fn sample_passengers() -> Dataset {
    Dataset::from_columns([
        Column::int("Pclass", &[Some(3), Some(1), Some(3), Some(1), Some(3), Some(2), Some(2), Some(3)]),
        Column::int("Survived", &[Some(0), Some(1), Some(1), Some(1), Some(0), Some(0), Some(1), Some(0)]),
        Column::text(
            "Sex",
            &[Some("male"), Some("female"), Some("female"), Some("female"), Some("male"), Some("male"), None, Some("male")],
        ),
        Column::float(
            "Age",
            &[Some(22.0), Some(38.0), Some(26.0), Some(35.0), Some(35.0), None, Some(14.0), Some(2.0)],
        ),
    ])
    .expect("sample columns have equal length")
}

/// Class-by-survival heatmap and class-by-age box plot, drawn with the
/// context's font rather than the per-call default path.
fn survival_figures(ctx: &mut RenderContext, dataset: &Dataset) -> Result<()> {
    plot_heatmap(ctx, dataset, "Pclass", "Survived", &HeatmapOptions::new().no_font().show_percentage(true))?;
    plot_boxplot(ctx, dataset, "Pclass", "Age", &BoxPlotOptions::new().no_font())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let dataset = match args.next() {
        Some(path) => Dataset::from_csv_path(path)?,
        None => sample_passengers(),
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "eda_output".to_string()));
    std::fs::create_dir_all(&out_dir)?;

    let config = EdaConfig::from_env()?;
    data_overview(&dataset, config.head_rows)?;

    let mut ctx = match RenderContext::from_config(&config) {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::warn!(%err, "font unavailable, rendering without raster text");
            RenderContext::new().size(config.figure.width, config.figure.height)?
        }
    };

    ctx.set_sink(PngSink::new(out_dir.clone()));
    survival_figures(&mut ctx, &dataset)?;
    ctx.set_sink(SvgSink::new(out_dir.clone()));
    survival_figures(&mut ctx, &dataset)?;

    ctx.set_sink(TerminalSink::new(config.terminal.width));
    plot_heatmap(&mut ctx, &dataset, "Sex", "Survived", &HeatmapOptions::new().no_font())?;

    println!("\nFigures written to {}", out_dir.display());
    Ok(())
}
