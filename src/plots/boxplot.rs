//! Box plot of a numeric column grouped by a categorical column.
//!
//! Each group shows quartiles as a box, the median as a thick line, whiskers to
//! the furthest points within 1.5 × IQR, and outliers as open circles. A dashed,
//! translucent grid is laid over the axes.
//!
//! # References
//!
//! - Tukey, J. W. (1977). *Exploratory Data Analysis*. Addison-Wesley.
//! - McGill, R., Tukey, J. W., & Larsen, W. A. (1978). "Variations of Box Plots."
//!   The American Statistician, 32(1), 12-16.

use super::layout::{self, PlotArea, LABEL_PX, TICK_PX};
use crate::color::Rgba;
use crate::context::RenderContext;
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::figure::{Figure, FigureKind};
use crate::font::{FontResource, DEFAULT_FONT_PATH};
use crate::render::Canvas;
use crate::scale::{LinearScale, Scale};
use crate::stats::{group_by_category, BoxStats};
use batuta_common::display::WithDimensions;
use std::path::PathBuf;
use std::sync::Arc;

/// Box fills, cycled across groups.
const PALETTE: [Rgba; 10] = [
    Rgba::rgb(76, 114, 176),
    Rgba::rgb(221, 132, 82),
    Rgba::rgb(85, 168, 104),
    Rgba::rgb(196, 78, 82),
    Rgba::rgb(129, 114, 179),
    Rgba::rgb(147, 120, 96),
    Rgba::rgb(218, 139, 195),
    Rgba::rgb(140, 140, 140),
    Rgba::rgb(204, 185, 116),
    Rgba::rgb(100, 181, 205),
];

/// Grid line opacity.
pub const GRID_ALPHA: f32 = 0.7;
/// Grid dash pattern `(on, off)` in pixels.
const GRID_DASH: (usize, usize) = (6, 4);
/// Outlier marker radius in pixels.
const OUTLIER_RADIUS: f32 = 3.0;

// ============================================================================
// Builder
// ============================================================================

/// Builder for grouped box plots.
#[derive(Debug, Clone)]
pub struct BoxPlot {
    /// Data groups
    groups: Vec<Vec<f64>>,
    /// Group labels
    labels: Vec<String>,
    title: String,
    x_label: String,
    y_label: String,
    /// Outline, whisker, and median color
    line_color: Rgba,
    /// Image width
    width: u32,
    /// Image height
    height: u32,
    /// Box width as fraction of the group slot
    box_width: f32,
}

impl Default for BoxPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxPlot {
    /// Create a new box plot builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            labels: Vec::new(),
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            line_color: Rgba::rgb(61, 61, 61),
            width: RenderContext::DEFAULT_WIDTH,
            height: RenderContext::DEFAULT_HEIGHT,
            box_width: 0.8,
        }
    }

    /// Add a data group.
    #[must_use]
    pub fn add_group(mut self, data: &[f64], label: &str) -> Self {
        self.groups.push(data.to_vec());
        self.labels.push(label.to_string());
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the x (category) and y (value) axis labels.
    #[must_use]
    pub fn axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    /// Set box width as fraction (0.1 to 1.0).
    #[must_use]
    pub fn box_width(mut self, width: f32) -> Self {
        self.box_width = width.clamp(0.1, 1.0);
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Build the box plot.
    ///
    /// Groups without finite values keep their slot but draw no box.
    ///
    /// # Errors
    ///
    /// Returns an error if no groups were added.
    pub fn build(self) -> Result<BuiltBoxPlot> {
        if self.groups.is_empty() {
            return Err(Error::EmptyData);
        }

        let stats = self.groups.iter().map(|g| BoxStats::from_data(g)).collect();

        Ok(BuiltBoxPlot {
            stats,
            labels: self.labels,
            title: self.title,
            x_label: self.x_label,
            y_label: self.y_label,
            line_color: self.line_color,
            width: self.width,
            height: self.height,
            box_width: self.box_width,
        })
    }
}

impl WithDimensions for BoxPlot {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

/// A built box plot ready for rendering.
#[derive(Debug)]
pub struct BuiltBoxPlot {
    stats: Vec<Option<BoxStats>>,
    labels: Vec<String>,
    title: String,
    x_label: String,
    y_label: String,
    line_color: Rgba,
    width: u32,
    height: u32,
    box_width: f32,
}

impl BuiltBoxPlot {
    /// Number of group slots, including empty ones.
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.stats.len()
    }

    /// Statistics for a group; `None` for an empty group.
    #[must_use]
    pub fn stats(&self, index: usize) -> Option<&BoxStats> {
        self.stats.get(index)?.as_ref()
    }

    /// Group labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Value range covering every whisker and outlier, padded by 5%.
    ///
    /// Computed in `f64` so large-magnitude values keep their spread.
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .stats
            .iter()
            .flatten()
            .flat_map(|s| [s.lowest(), s.highest()])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if lo > hi {
            return (0.0, 1.0);
        }
        if layout::is_flat(lo, hi) {
            return layout::widen_flat(lo, hi);
        }
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    }

    /// Render onto a canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas is too small for the layout.
    pub fn render(&self, canvas: &mut Canvas) -> Result<()> {
        let (lo, hi) = self.value_range();
        let ticks = layout::nice_ticks(lo, hi, 6);
        let step = if ticks.len() > 1 { ticks[1] - ticks[0] } else { 1.0 };
        let tick_labels: Vec<String> = ticks.iter().map(|&t| layout::format_tick(t, step)).collect();

        let y_tick_width = layout::max_label_width(canvas, &tick_labels);
        let area = PlotArea::new(canvas, y_tick_width, TICK_PX * 2.0 + LABEL_PX * 3.0, 24.0)?;
        let y_scale = LinearScale::new((lo, hi), (area.bottom(), area.top))?;
        let map_y = |v: f64| y_scale.scale(v);

        let slot = area.width / self.stats.len() as f32;
        let half_box = slot * self.box_width / 2.0;

        for (i, stats) in self.stats.iter().enumerate() {
            let Some(stats) = stats else { continue };
            let cx = area.left + slot * (i as f32 + 0.5);
            let fill = PALETTE[i % PALETTE.len()];
            self.draw_box(canvas, stats, cx, half_box, fill, &map_y);
        }

        canvas.rect_outline(area.left, area.top, area.width, area.height, None, Rgba::DARK_GREY);

        let grid = Rgba::LIGHT_GREY.with_opacity(GRID_ALPHA);
        for (&tick, label) in ticks.iter().zip(&tick_labels) {
            let y = map_y(tick);
            canvas.dashed_line(area.left, y, area.right(), y, grid, GRID_DASH);
            layout::draw_y_tick(canvas, &area, y, label);
        }
        for i in 0..self.stats.len() {
            let x = area.left + slot * (i as f32 + 0.5);
            canvas.dashed_line(x, area.top, x, area.bottom(), grid, GRID_DASH);
        }

        layout::draw_x_ticks(canvas, &area, &self.labels);
        layout::draw_titles(canvas, &area, &self.title, &self.x_label, &self.y_label);
        Ok(())
    }

    fn draw_box(
        &self,
        canvas: &mut Canvas,
        stats: &BoxStats,
        cx: f32,
        half_box: f32,
        fill: Rgba,
        map_y: &impl Fn(f64) -> f32,
    ) {
        let line = self.line_color;
        let (y_min, y_q1, y_med, y_q3, y_max) =
            (map_y(stats.min), map_y(stats.q1), map_y(stats.median), map_y(stats.q3), map_y(stats.max));
        let cap = half_box / 2.0;

        // whiskers and caps
        canvas.line(cx, y_q1, cx, y_min, line, 1);
        canvas.line(cx, y_q3, cx, y_max, line, 1);
        canvas.line(cx - cap, y_min, cx + cap, y_min, line, 1);
        canvas.line(cx - cap, y_max, cx + cap, y_max, line, 1);

        canvas.rect_outline(cx - half_box, y_q3, half_box * 2.0, (y_q1 - y_q3).max(1.0), Some(fill), line);
        canvas.line(cx - half_box, y_med, cx + half_box, y_med, line, 2);

        for &outlier in &stats.outliers {
            canvas.circle(cx, map_y(outlier), OUTLIER_RADIUS, line);
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
        Ok(canvas.into_figure(FigureKind::BoxPlot, self.title.clone(), self.x_label.clone(), self.y_label.clone()))
    }
}

// ============================================================================
// EDA entry point
// ============================================================================

/// Options for [`plot_boxplot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxPlotOptions {
    /// Font registered before rendering; `None` keeps the context's font.
    pub font_path: Option<PathBuf>,
    /// Title; defaults to `"<cat> と <num> の箱ひげ図"`.
    pub title: Option<String>,
}

impl Default for BoxPlotOptions {
    fn default() -> Self {
        Self { font_path: Some(PathBuf::from(DEFAULT_FONT_PATH)), title: None }
    }
}

impl BoxPlotOptions {
    /// Defaults: the bundled font path and a generated title.
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

    /// Override the generated title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Default box plot title.
#[must_use]
pub fn default_boxplot_title(cat: &str, num: &str) -> String {
    format!("{cat} と {num} の箱ひげ図")
}

/// Show the distribution of numeric column `num` for each value of categorical
/// column `cat`, in ascending category order.
///
/// # Errors
///
/// - [`Error::ResourceLoad`] if `options.font_path` cannot be loaded
/// - [`Error::MissingColumn`] if either column is absent
/// - [`Error::ColumnType`] if `num` is not numeric
/// - [`Error::EmptyData`] if `cat` has no non-missing values
///
/// Nothing is shown when an error is returned.
pub fn plot_boxplot(
    ctx: &mut RenderContext,
    dataset: &Dataset,
    cat: &str,
    num: &str,
    options: &BoxPlotOptions,
) -> Result<()> {
    if let Some(path) = &options.font_path {
        ctx.register_font(path)?;
    }

    let groups = group_by_category(dataset, cat, num)?;
    let title = options.title.clone().unwrap_or_else(|| default_boxplot_title(cat, num));

    let mut plot = groups
        .iter()
        .fold(BoxPlot::new(), |plot, g| plot.add_group(&g.values, &g.label.to_string()))
        .title(title)
        .axis_labels(cat, num);
    let (width, height) = ctx.dimensions();
    plot.set_dimensions(width, height);
    let plot = plot.build()?;

    tracing::debug!(groups = plot.num_groups(), "box plot built");
    let figure = plot.to_figure(ctx.font().cloned())?;
    ctx.show(&figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;
    use crate::figure::CaptureSink;
    use crate::output::SvgElement;
    use approx::assert_relative_eq;

    fn passengers() -> Dataset {
        Dataset::new()
            .with_column(Column::text(
                "class",
                &[Some("3rd"), Some("1st"), Some("1st"), Some("3rd"), None, Some("2nd")],
            ))
            .unwrap()
            .with_column(Column::float("fare", &[Some(7.25), Some(71.3), Some(53.1), Some(8.05), Some(9.0), None]))
            .unwrap()
    }

    fn capture_ctx() -> (RenderContext, CaptureSink) {
        let capture = CaptureSink::new();
        (RenderContext::with_sink(capture.clone()), capture)
    }

    #[test]
    fn test_boxplot_builder() {
        let plot = BoxPlot::new()
            .add_group(&[1.0, 2.0, 3.0, 4.0, 5.0], "A")
            .add_group(&[2.0, 3.0, 4.0, 5.0, 6.0], "B")
            .build()
            .unwrap();

        assert_eq!(plot.num_groups(), 2);
        assert_eq!(plot.labels(), ["A", "B"]);
        assert_relative_eq!(plot.stats(1).unwrap().median, 4.0);
    }

    #[test]
    fn test_boxplot_empty() {
        assert!(matches!(BoxPlot::new().build(), Err(Error::EmptyData)));
    }

    #[test]
    fn test_empty_group_keeps_slot() {
        let plot = BoxPlot::new().add_group(&[], "none").add_group(&[1.0, 3.0], "some").build().unwrap();
        assert_eq!(plot.num_groups(), 2);
        assert!(plot.stats(0).is_none());
        assert!(plot.stats(1).is_some());
    }

    #[test]
    fn test_value_range_padding() {
        let plot = BoxPlot::new().add_group(&[0.0, 10.0], "a").build().unwrap();
        let (lo, hi) = plot.value_range();
        assert_relative_eq!(lo, -0.5);
        assert_relative_eq!(hi, 10.5);

        let flat = BoxPlot::new().add_group(&[4.0, 4.0], "a").build().unwrap();
        assert_eq!(flat.value_range(), (3.5, 4.5));
    }

    #[test]
    fn test_render_outliers_and_dashed_grid() {
        let plot = BoxPlot::new()
            .add_group(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0], "A")
            .dimensions(600, 400)
            .build()
            .unwrap();
        let figure = plot.to_figure(None).unwrap();
        let elements = figure.svg().elements();

        let circles = elements.iter().filter(|e| matches!(e, SvgElement::Circle { .. })).count();
        assert_eq!(circles, 1);
        let grid_ok = elements
            .iter()
            .filter_map(|e| match e {
                SvgElement::Line { dash: Some(_), stroke, .. } => Some(stroke.a),
                _ => None,
            })
            .all(|a| a > 150 && a < 255);
        assert!(grid_ok);
        assert!(elements.iter().any(|e| matches!(e, SvgElement::Line { dash: Some(_), .. })));
        assert!(figure.to_svg().contains("stroke-dasharray"));
    }

    #[test]
    fn test_plot_boxplot_groups_in_order() {
        let (mut ctx, capture) = capture_ctx();
        plot_boxplot(&mut ctx, &passengers(), "class", "fare", &BoxPlotOptions::new().no_font()).unwrap();

        let figure = &capture.figures()[0];
        assert_eq!(figure.kind(), FigureKind::BoxPlot);
        assert_eq!(figure.title(), "class と fare の箱ひげ図");
        assert_eq!(figure.x_label(), "class");
        assert_eq!(figure.y_label(), "fare");

        let texts: Vec<&str> = figure
            .svg()
            .elements()
            .iter()
            .filter_map(|e| match e {
                SvgElement::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let pos = |s: &str| texts.iter().position(|t| *t == s);
        // 2nd has no fares but keeps its slot
        assert!(pos("1st") < pos("2nd") && pos("2nd") < pos("3rd"), "{texts:?}");
    }

    #[test]
    fn test_plot_boxplot_constant_timestamps() {
        let ds = Dataset::new()
            .with_column(Column::text("host", &[Some("a"), Some("a"), Some("a"), Some("b"), Some("b"), Some("b")]))
            .unwrap()
            .with_column(Column::float("t", &[Some(1.7e9); 6]))
            .unwrap();
        let capture = CaptureSink::new();
        let mut ctx = RenderContext::with_sink(capture.clone()).size(500, 300).unwrap();

        plot_boxplot(&mut ctx, &ds, "host", "t", &BoxPlotOptions::new().no_font()).unwrap();
        assert_eq!(capture.len(), 1);

        // median lines sit mid-plot, not collapsed onto an edge
        let figure = &capture.figures()[0];
        let medians: Vec<f32> = figure
            .svg()
            .elements()
            .iter()
            .filter_map(|e| match e {
                SvgElement::Line { y1, stroke_width, .. } if (*stroke_width - 2.0).abs() < 1e-6 => Some(*y1),
                _ => None,
            })
            .collect();
        assert_eq!(medians.len(), 2);
        assert!(medians.iter().all(|y| *y > 60.0 && *y < 240.0), "{medians:?}");
    }

    #[test]
    fn test_value_range_keeps_large_magnitude_spread() {
        let plot = BoxPlot::new().add_group(&[1e8, 1e8 + 3.0], "a").dimensions(400, 300).build().unwrap();
        let (lo, hi) = plot.value_range();
        assert!(lo < 1e8 && hi > 1e8 + 3.0);
        assert_relative_eq!(hi - lo, 3.3, epsilon = 1e-6);
        assert!(plot.to_figure(None).is_ok());

        let flat = BoxPlot::new().add_group(&[1.7e9; 3], "a").build().unwrap();
        assert_eq!(flat.value_range(), (1.7e9 - 1.7e6, 1.7e9 + 1.7e6));
    }

    #[test]
    fn test_plot_boxplot_requires_numeric() {
        let (mut ctx, capture) = capture_ctx();
        let err = plot_boxplot(&mut ctx, &passengers(), "fare", "class", &BoxPlotOptions::new().no_font())
            .unwrap_err();
        assert!(matches!(err, Error::ColumnType { .. }));
        assert!(capture.is_empty());
    }

    #[test]
    fn test_plot_boxplot_missing_column() {
        let (mut ctx, capture) = capture_ctx();
        let err = plot_boxplot(&mut ctx, &passengers(), "deck", "fare", &BoxPlotOptions::new().no_font())
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumn { .. }));
        assert!(capture.is_empty());
    }

    #[test]
    fn test_plot_boxplot_bad_font() {
        let (mut ctx, capture) = capture_ctx();
        let options = BoxPlotOptions::new().font_path("/nonexistent/ipaexg.ttf").title("t");
        let err = plot_boxplot(&mut ctx, &passengers(), "class", "fare", &options).unwrap_err();
        assert!(matches!(err, Error::ResourceLoad { .. }));
        assert!(capture.is_empty());
    }
}
