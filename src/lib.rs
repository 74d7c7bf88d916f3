//! # Trueno-EDA
//!
//! Exploratory data analysis helpers for categorical data, rendered with the
//! [trueno](https://crates.io/crates/trueno) SIMD stack and no browser or
//! plotting-library dependencies.
//!
//! ## Operations
//!
//! - [`data_overview`]: shape, dtypes, head rows, missing counts, and a
//!   descriptive-statistics table printed to stdout
//! - [`plot_heatmap`]: cross-tabulation of two categorical columns as an
//!   annotated heatmap, counts or row percentages
//! - [`plot_boxplot`]: box-and-whisker plot of a numeric column grouped by a
//!   categorical column
//!
//! Plots draw into a [`RenderContext`], which owns the active font and the
//! [`FigureSink`](figure::FigureSink) that displays figures (terminal, PNG, SVG,
//! or in-memory capture).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trueno_eda::prelude::*;
//!
//! let titanic = Dataset::from_csv_path("titanic.csv")?;
//! data_overview(&titanic, DEFAULT_HEAD_ROWS)?;
//!
//! let mut ctx = RenderContext::with_sink(PngSink::new("figures"));
//! plot_heatmap(&mut ctx, &titanic, "Pclass", "Survived", &HeatmapOptions::new().show_percentage(true))?;
//! plot_boxplot(&mut ctx, &titanic, "Pclass", "Age", &BoxPlotOptions::new())?;
//! ```
//!
//! ## Academic References
//!
//! - Tukey, J. W. (1977). *Exploratory Data Analysis*. Addison-Wesley.
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Hyndman, R. J., & Fan, Y. (1996). "Sample Quantiles in Statistical Packages."
//!   The American Statistician, 50(4), 361-365.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Data Modules
// ============================================================================

/// In-memory tabular data and CSV loading.
pub mod data;

/// Descriptive statistics, cross-tabulation, and box statistics.
pub mod stats;

/// Console overview report.
pub mod report;

// ============================================================================
// Core Rendering Modules
// ============================================================================

/// RGBA colors.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Rasterization and the dual raster/vector canvas.
pub mod render;

/// Output encoders (PNG, SVG, terminal).
pub mod output;

/// Font resources.
pub mod font;

// ============================================================================
// Figure Modules
// ============================================================================

/// Categorical heatmap and box plot.
pub mod plots;

/// Rendered figures and figure sinks.
pub mod figure;

/// Rendering context (active font, figure size, sink).
pub mod context;

/// YAML configuration.
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-eda operations.
pub mod error;

pub use context::RenderContext;
pub use error::{Error, Result};
pub use plots::{plot_boxplot, plot_heatmap, BoxPlotOptions, HeatmapOptions};
pub use report::{data_overview, write_overview, DEFAULT_HEAD_ROWS};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use trueno_eda::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::EdaConfig;
    pub use crate::context::RenderContext;
    pub use crate::data::{Column, DType, Dataset, Value};
    pub use crate::error::{Error, Result};
    pub use crate::figure::{CaptureSink, Figure, FigureKind, FigureSink, PngSink, SvgSink, TerminalSink};
    pub use crate::font::{FontResource, DEFAULT_FONT_PATH};
    pub use crate::plots::{plot_boxplot, plot_heatmap, BoxPlot, BoxPlotOptions, Heatmap, HeatmapOptions};
    pub use crate::report::{data_overview, write_overview, DEFAULT_HEAD_ROWS};
    pub use crate::stats::{BoxStats, CrossTab, CrossTabValues, Describe};
    pub use batuta_common::display::WithDimensions;
}
