//! Categorical plots.
//!
//! Each plot has a builder (`Heatmap`, `BoxPlot`) that renders matrices or
//! groups it is given, plus an entry point (`plot_heatmap`, `plot_boxplot`)
//! that derives those from a [`Dataset`](crate::data::Dataset) and shows the
//! result through a [`RenderContext`](crate::context::RenderContext).

mod boxplot;
mod heatmap;
mod layout;

pub use boxplot::{default_boxplot_title, plot_boxplot, BoxPlot, BoxPlotOptions, BuiltBoxPlot, GRID_ALPHA};
pub use heatmap::{default_heatmap_title, plot_heatmap, Heatmap, HeatmapOptions};
