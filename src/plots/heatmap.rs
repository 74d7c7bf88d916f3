//! Annotated heatmap of a categorical cross-tabulation.
//!
//! Renders a grid of values as colored cells using the reversed RdYlBu
//! palette, writes each value into its cell, and adds a vertical color bar.
//! Undefined cells (`NaN`) stay unfilled and are annotated `nan`.
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Brewer, C. A. (2003). ColorBrewer: diverging RdYlBu scheme.

use super::layout::{self, PlotArea, LABEL_PX, TICK_PX};
use crate::color::Rgba;
use crate::context::RenderContext;
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::figure::{Figure, FigureKind};
use crate::font::{FontResource, DEFAULT_FONT_PATH};
use crate::output::TextAnchor;
use crate::render::Canvas;
use crate::scale::{ColorScale, Scale};
use crate::stats::{CrossTab, CrossTabValues};
use batuta_common::display::WithDimensions;
use std::path::PathBuf;
use std::sync::Arc;
use trueno::Vector;

/// Width of the color bar in pixels.
const COLOR_BAR_WIDTH: f32 = 20.0;
/// Horizontal room reserved right of the grid for the bar and its labels.
const COLOR_BAR_BAND: f32 = 110.0;
/// Number of bands the bar gradient is drawn with.
const COLOR_BAR_STEPS: usize = 64;

// ============================================================================
// Builder
// ============================================================================

/// Builder for annotated heatmaps.
#[derive(Debug, Clone)]
pub struct Heatmap {
    /// Cell values in row-major order; `NaN` marks an undefined cell.
    values: Vec<f64>,
    /// Number of rows in the matrix.
    rows: usize,
    /// Number of columns in the matrix.
    cols: usize,
    /// Tick labels for rows (top to bottom).
    row_labels: Vec<String>,
    /// Tick labels for columns (left to right).
    col_labels: Vec<String>,
    /// Annotation format.
    format: CrossTabValues,
    title: String,
    x_label: String,
    y_label: String,
    /// Output width in pixels.
    width: u32,
    /// Output height in pixels.
    height: u32,
    /// Cell border color.
    border_color: Rgba,
}

impl Default for Heatmap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heatmap {
    /// Create a new heatmap builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            rows: 0,
            cols: 0,
            row_labels: Vec::new(),
            col_labels: Vec::new(),
            format: CrossTabValues::Counts,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            width: RenderContext::DEFAULT_WIDTH,
            height: RenderContext::DEFAULT_HEIGHT,
            border_color: Rgba::WHITE,
        }
    }

    /// Heatmap of a cross-tabulation presented as `mode`, with category labels.
    #[must_use]
    pub fn from_crosstab(table: &CrossTab, mode: CrossTabValues) -> Self {
        Self::new()
            .data(&table.values(mode), table.n_rows(), table.n_cols())
            .labels(
                table.row_labels().iter().map(ToString::to_string).collect(),
                table.col_labels().iter().map(ToString::to_string).collect(),
            )
            .format(mode)
    }

    /// Set the data matrix in row-major order.
    #[must_use]
    pub fn data(mut self, values: &[f64], rows: usize, cols: usize) -> Self {
        self.values = values.to_vec();
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Set row and column tick labels.
    #[must_use]
    pub fn labels(mut self, rows: Vec<String>, cols: Vec<String>) -> Self {
        self.row_labels = rows;
        self.col_labels = cols;
        self
    }

    /// Set the annotation format: integers for counts, one decimal for percentages.
    #[must_use]
    pub fn format(mut self, format: CrossTabValues) -> Self {
        self.format = format;
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the x (columns) and y (rows) axis labels.
    #[must_use]
    pub fn axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Build and validate the heatmap.
    ///
    /// # Errors
    ///
    /// Returns an error if data is empty, dimensions are zero, or the data or
    /// label lengths don't match the matrix shape.
    pub fn build(self) -> Result<Self> {
        if self.values.is_empty() {
            return Err(Error::EmptyData);
        }

        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidDimensions { width: self.cols as u32, height: self.rows as u32 });
        }

        let expected = self.rows * self.cols;
        if self.values.len() != expected {
            return Err(Error::DataLengthMismatch { expected, actual: self.values.len() });
        }
        if self.row_labels.len() != self.rows {
            return Err(Error::DataLengthMismatch { expected: self.rows, actual: self.row_labels.len() });
        }
        if self.col_labels.len() != self.cols {
            return Err(Error::DataLengthMismatch { expected: self.cols, actual: self.col_labels.len() });
        }

        Ok(self)
    }

    /// Get the number of rows.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    #[must_use]
    pub const fn col_count(&self) -> usize {
        self.cols
    }

    /// Annotation text for cell `(row, col)`.
    #[must_use]
    pub fn annotation(&self, row: usize, col: usize) -> Option<String> {
        let value = *self.values.get(row * self.cols + col)?;
        Some(format_value(value, self.format))
    }

    /// Min and max of the finite cell values.
    #[must_use]
    pub fn value_extent(&self) -> Option<(f32, f32)> {
        let finite: Vec<f32> = self.values.iter().filter(|v| v.is_finite()).map(|&v| v as f32).collect();
        if finite.is_empty() {
            return None;
        }
        let v = Vector::from_vec(finite);
        Some((v.min().ok()?, v.max().ok()?))
    }

    /// Reversed RdYlBu over the finite extent, widened when all values are equal.
    fn color_scale(&self) -> Option<ColorScale> {
        let (min, max) = self.value_extent()?;
        let (lo, hi) = layout::widen_flat(f64::from(min), f64::from(max));
        ColorScale::rd_yl_bu_r((lo as f32, hi as f32))
    }

    /// Render onto a canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas is too small for the layout.
    pub fn render(&self, canvas: &mut Canvas) -> Result<()> {
        let y_tick_width = layout::max_label_width(canvas, &self.row_labels);
        let area = PlotArea::new(canvas, y_tick_width, TICK_PX * 2.0 + LABEL_PX * 3.0, COLOR_BAR_BAND)?;
        let scale = self.color_scale();

        let cell_w = area.width / self.cols as f32;
        let cell_h = area.height / self.rows as f32;
        let annotation_px = (cell_h * 0.35).clamp(8.0, 16.0);

        for row in 0..self.rows {
            for col in 0..self.cols {
                let value = self.values[row * self.cols + col];
                let x = area.left + col as f32 * cell_w;
                let y = area.top + row as f32 * cell_h;
                let (cx, cy) = (x + cell_w / 2.0, y + cell_h / 2.0);

                let text_color = match (&scale, value.is_finite()) {
                    (Some(scale), true) => {
                        let fill = scale.scale(value as f32);
                        canvas.rect_outline(x, y, cell_w, cell_h, Some(fill), self.border_color);
                        fill.contrasting_text()
                    }
                    _ => Rgba::BLACK,
                };
                canvas.text(cx, cy, &format_value(value, self.format), annotation_px, text_color, TextAnchor::Middle);
            }
        }

        for (row, label) in self.row_labels.iter().enumerate() {
            let y = area.top + cell_h * (row as f32 + 0.5);
            layout::draw_y_tick(canvas, &area, y, label);
        }
        layout::draw_x_ticks(canvas, &area, &self.col_labels);
        layout::draw_titles(canvas, &area, &self.title, &self.x_label, &self.y_label);

        if let Some(scale) = &scale {
            self.draw_color_bar(canvas, &area, scale);
        }
        Ok(())
    }

    /// Vertical gradient right of the grid, low values at the bottom.
    fn draw_color_bar(&self, canvas: &mut Canvas, area: &PlotArea, scale: &ColorScale) {
        let (lo, hi) = scale.domain();
        let x = area.right() + 24.0;
        let band = area.height / COLOR_BAR_STEPS as f32;

        for i in 0..COLOR_BAR_STEPS {
            let t = (i as f32 + 0.5) / COLOR_BAR_STEPS as f32;
            let y = area.bottom() - (i + 1) as f32 * band;
            canvas.fill_rect(x, y, COLOR_BAR_WIDTH, band, scale.scale(lo + t * (hi - lo)));
        }
        canvas.rect_outline(x, area.top, COLOR_BAR_WIDTH, area.height, None, Rgba::DARK_GREY);

        let label_x = x + COLOR_BAR_WIDTH + 6.0;
        for (value, y) in [(hi, area.top), (lo, area.bottom())] {
            canvas.line(x + COLOR_BAR_WIDTH, y, label_x - 2.0, y, Rgba::DARK_GREY, 1);
            let label = format_value(f64::from(value), self.format);
            canvas.text(label_x, y, &label, TICK_PX, Rgba::BLACK, TextAnchor::Start);
        }
    }

    /// Render to a new figure.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_figure(&self, font: Option<Arc<FontResource>>) -> Result<Figure> {
        let mut canvas = Canvas::new(self.width, self.height, font)?;
        self.render(&mut canvas)?;
        Ok(canvas.into_figure(FigureKind::Heatmap, self.title.clone(), self.x_label.clone(), self.y_label.clone()))
    }
}

impl WithDimensions for Heatmap {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

/// Integer for counts, one decimal for percentages, `nan` when undefined.
fn format_value(value: f64, format: CrossTabValues) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    match format {
        CrossTabValues::Counts => format!("{value:.0}"),
        CrossTabValues::Percentages => format!("{value:.1}"),
    }
}

// ============================================================================
// EDA entry point
// ============================================================================

/// Options for [`plot_heatmap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapOptions {
    /// Font registered before rendering; `None` keeps the context's font.
    pub font_path: Option<PathBuf>,
    /// Show row percentages instead of counts.
    pub show_percentage: bool,
    /// Title; defaults to `"<col1> と <col2> のヒートマップ"`.
    pub title: Option<String>,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self { font_path: Some(PathBuf::from(DEFAULT_FONT_PATH)), show_percentage: false, title: None }
    }
}

impl HeatmapOptions {
    /// Defaults: the bundled font path, counts, generated title.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register this font file before rendering.
    #[must_use]
    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Use whatever font the context already has.
    #[must_use]
    pub fn no_font(mut self) -> Self {
        self.font_path = None;
        self
    }

    /// Row-normalize to percentages.
    #[must_use]
    pub fn show_percentage(mut self, show: bool) -> Self {
        self.show_percentage = show;
        self
    }

    /// Override the generated title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Default heatmap title.
#[must_use]
pub fn default_heatmap_title(col1: &str, col2: &str, show_percentage: bool) -> String {
    let suffix = if show_percentage { "（割合）" } else { "" };
    format!("{col1} と {col2} のヒートマップ{suffix}")
}

/// Cross-tabulate `col1` (rows) against `col2` (columns) and show an
/// annotated heatmap on the context's sink.
///
/// # Errors
///
/// - [`Error::ResourceLoad`] if `options.font_path` cannot be loaded
/// - [`Error::MissingColumn`] if either column is absent
/// - [`Error::EmptyData`] if no row has both values present
///
/// Nothing is shown when an error is returned.
pub fn plot_heatmap(
    ctx: &mut RenderContext,
    dataset: &Dataset,
    col1: &str,
    col2: &str,
    options: &HeatmapOptions,
) -> Result<()> {
    if let Some(path) = &options.font_path {
        ctx.register_font(path)?;
    }

    let table = CrossTab::from_columns(dataset, col1, col2)?;
    let mode = if options.show_percentage { CrossTabValues::Percentages } else { CrossTabValues::Counts };
    let title =
        options.title.clone().unwrap_or_else(|| default_heatmap_title(col1, col2, options.show_percentage));

    let mut heatmap = Heatmap::from_crosstab(&table, mode).title(title).axis_labels(col2, col1);
    let (width, height) = ctx.dimensions();
    heatmap.set_dimensions(width, height);
    let heatmap = heatmap.build()?;

    tracing::debug!(rows = heatmap.row_count(), cols = heatmap.col_count(), ?mode, "heatmap built");
    let figure = heatmap.to_figure(ctx.font().cloned())?;
    ctx.show(&figure)
}
