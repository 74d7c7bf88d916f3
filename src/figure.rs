//! Finished figures and the sinks that display them.
//!
//! A [`Figure`] carries both a raster and a vector rendering of a plot. Plot
//! functions hand figures to the [`FigureSink`] owned by the
//! [`RenderContext`](crate::context::RenderContext); the sink decides what
//! "display" means: print to the terminal, write files, or keep them in memory.

use crate::error::{Error, Result};
use crate::font::FontResource;
use crate::framebuffer::Framebuffer;
use crate::output::{PngEncoder, SvgEncoder, TerminalEncoder, TerminalMode};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// ============================================================================
// Figure
// ============================================================================

/// Which plot produced a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    /// Annotated cross-tabulation heatmap.
    Heatmap,
    /// Grouped box-and-whisker plot.
    BoxPlot,
}

impl fmt::Display for FigureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heatmap => f.write_str("heatmap"),
            Self::BoxPlot => f.write_str("boxplot"),
        }
    }
}

/// A rendered plot.
#[derive(Debug, Clone)]
pub struct Figure {
    pub(crate) kind: FigureKind,
    pub(crate) title: String,
    pub(crate) x_label: String,
    pub(crate) y_label: String,
    pub(crate) framebuffer: Framebuffer,
    pub(crate) svg: SvgEncoder,
    pub(crate) font: Option<Arc<FontResource>>,
}

impl Figure {
    /// Plot type.
    #[must_use]
    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    /// Figure title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Horizontal axis label.
    #[must_use]
    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    /// Vertical axis label.
    #[must_use]
    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// Raster rendering.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Vector rendering.
    #[must_use]
    pub fn svg(&self) -> &SvgEncoder {
        &self.svg
    }

    /// Typeface the figure was rendered with, if one was registered.
    #[must_use]
    pub fn font(&self) -> Option<&Arc<FontResource>> {
        self.font.as_ref()
    }

    /// Encode the raster rendering as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        PngEncoder::to_bytes(&self.framebuffer)
    }

    /// Serialize the vector rendering.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.svg.render()
    }
}

// ============================================================================
// Sinks
// ============================================================================

/// Destination for finished figures.
pub trait FigureSink {
    /// Display `figure`. Returns once the figure has been fully handled.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure cannot be written out.
    fn show(&mut self, figure: &Figure) -> Result<()>;
}

/// Prints the title and a half-block rendering of each figure to stdout.
#[derive(Debug, Clone, Default)]
pub struct TerminalSink {
    encoder: TerminalEncoder,
}

impl TerminalSink {
    /// Sink rendering `width` character cells wide.
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self { encoder: TerminalEncoder::new().mode(TerminalMode::UnicodeHalfBlock).width(width) }
    }

    /// Use plain ASCII instead of ANSI color.
    #[must_use]
    pub fn ascii(mut self) -> Self {
        self.encoder = self.encoder.mode(TerminalMode::Ascii);
        self
    }
}

impl FigureSink for TerminalSink {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        let rendered = self.encoder.render(&figure.framebuffer);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}", figure.title)?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Writes `figure_NNN.png` files into a directory.
#[derive(Debug, Clone)]
pub struct PngSink {
    dir: PathBuf,
    count: usize,
}

impl PngSink {
    /// Sink writing into `dir` (must exist).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), count: 0 }
    }
}

impl FigureSink for PngSink {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        self.count += 1;
        let path = numbered(&self.dir, self.count, "png");
        PngEncoder::write_to_file(&figure.framebuffer, &path)?;
        tracing::debug!(path = %path.display(), "figure written");
        Ok(())
    }
}

/// Writes `figure_NNN.svg` files into a directory.
#[derive(Debug, Clone)]
pub struct SvgSink {
    dir: PathBuf,
    count: usize,
}

impl SvgSink {
    /// Sink writing into `dir` (must exist).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), count: 0 }
    }
}

impl FigureSink for SvgSink {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        self.count += 1;
        let path = numbered(&self.dir, self.count, "svg");
        figure.svg.write_to_file(&path)?;
        tracing::debug!(path = %path.display(), "figure written");
        Ok(())
    }
}

fn numbered(dir: &Path, n: usize, ext: &str) -> PathBuf {
    dir.join(format!("figure_{n:03}.{ext}"))
}

/// Keeps figures in memory. Clones share the same store, so keep one clone to
/// inspect what a context displayed.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    figures: Arc<Mutex<Vec<Figure>>>,
}

impl CaptureSink {
    /// Empty capture store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every figure shown so far, in order.
    #[must_use]
    pub fn figures(&self) -> Vec<Figure> {
        match self.figures.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of figures shown so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.figures().len()
    }

    /// True when nothing has been shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FigureSink for CaptureSink {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        self.figures
            .lock()
            .map_err(|e| Error::Rendering(format!("capture store poisoned: {e}")))?
            .push(figure.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn figure(kind: FigureKind) -> Figure {
        let mut framebuffer = Framebuffer::new(20, 10).unwrap();
        framebuffer.clear(Rgba::WHITE);
        Figure {
            kind,
            title: "t".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            framebuffer,
            svg: SvgEncoder::new(20, 10),
            font: None,
        }
    }

    #[test]
    fn test_terminal_sink_prints() {
        let mut sink = TerminalSink::new(20).ascii();
        sink.show(&figure(FigureKind::Heatmap)).unwrap();
    }

    #[test]
    fn test_capture_sink_shares_store() {
        let capture = CaptureSink::new();
        let mut sink = capture.clone();
        assert!(capture.is_empty());

        sink.show(&figure(FigureKind::Heatmap)).unwrap();
        sink.show(&figure(FigureKind::BoxPlot)).unwrap();

        let kinds: Vec<_> = capture.figures().iter().map(Figure::kind).collect();
        assert_eq!(kinds, vec![FigureKind::Heatmap, FigureKind::BoxPlot]);
    }

    #[test]
    fn test_png_sink_numbers_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::new(dir.path());
        sink.show(&figure(FigureKind::Heatmap)).unwrap();
        sink.show(&figure(FigureKind::Heatmap)).unwrap();

        assert!(dir.path().join("figure_001.png").exists());
        assert!(dir.path().join("figure_002.png").exists());
    }

    #[test]
    fn test_svg_sink_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = SvgSink::new(dir.path());
        sink.show(&figure(FigureKind::BoxPlot)).unwrap();

        let text = std::fs::read_to_string(dir.path().join("figure_001.svg")).unwrap();
        assert!(text.starts_with("<svg"));
    }

    #[test]
    fn test_png_sink_missing_dir_is_io_error() {
        let mut sink = PngSink::new("/nonexistent/figures");
        let err = sink.show(&figure(FigureKind::Heatmap)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_figure_png_bytes() {
        let bytes = figure(FigureKind::Heatmap).to_png_bytes().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
