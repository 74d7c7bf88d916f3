//! Rendering context.
//!
//! Holds what plots share between calls: the active typeface, figure size, and
//! the sink figures are shown on. Each context is independent; registering a
//! font in one never affects another.

use crate::config::EdaConfig;
use crate::error::{Error, Result};
use crate::figure::{Figure, FigureSink, TerminalSink};
use crate::font::FontResource;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Shared state for plotting calls.
pub struct RenderContext {
    font: Option<Arc<FontResource>>,
    width: u32,
    height: u32,
    sink: Box<dyn FigureSink>,
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("font", &self.font)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// Default figure width (10 in at 100 dpi).
    pub const DEFAULT_WIDTH: u32 = 1000;
    /// Default figure height (6 in at 100 dpi).
    pub const DEFAULT_HEIGHT: u32 = 600;

    /// Context showing figures on the terminal, with no font registered.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(TerminalSink::default())
    }

    /// Context showing figures on `sink`.
    #[must_use]
    pub fn with_sink(sink: impl FigureSink + 'static) -> Self {
        Self { font: None, width: Self::DEFAULT_WIDTH, height: Self::DEFAULT_HEIGHT, sink: Box::new(sink) }
    }

    /// Context built from configuration: figure size, terminal width, and the
    /// configured font (if any).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceLoad`] if the configured font cannot be loaded.
    pub fn from_config(config: &EdaConfig) -> Result<Self> {
        let mut ctx = Self::with_sink(TerminalSink::new(config.terminal.width))
            .size(config.figure.width, config.figure.height)?;
        if let Some(path) = &config.font.path {
            let mut font = FontResource::load(path)?;
            if let Some(family) = &config.font.family {
                font = font.with_family(family.clone());
            }
            ctx.set_font(font);
        }
        Ok(ctx)
    }

    /// Set the figure size in pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn size(mut self, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Replace the figure sink.
    pub fn set_sink(&mut self, sink: impl FigureSink + 'static) {
        self.sink = Box::new(sink);
    }

    /// Load a font file and make it the active typeface for later figures.
    ///
    /// On failure the previously active font stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceLoad`] if the file is missing or not a font.
    pub fn register_font(&mut self, path: impl AsRef<Path>) -> Result<Arc<FontResource>> {
        let font = Arc::new(FontResource::load(path)?);
        tracing::debug!(family = font.family(), "font registered");
        self.font = Some(Arc::clone(&font));
        Ok(font)
    }

    /// Make an already loaded font the active typeface.
    pub fn set_font(&mut self, font: FontResource) {
        tracing::debug!(family = font.family(), "font registered");
        self.font = Some(Arc::new(font));
    }

    /// Active typeface, if any.
    #[must_use]
    pub fn font(&self) -> Option<&Arc<FontResource>> {
        self.font.as_ref()
    }

    /// Figure size in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Hand a finished figure to the sink.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn show(&mut self, figure: &Figure) -> Result<()> {
        tracing::info!(kind = %figure.kind(), title = figure.title(), "showing figure");
        self.sink.show(figure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::CaptureSink;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let ctx = RenderContext::new();
        assert_eq!(ctx.dimensions(), (1000, 600));
        assert!(ctx.font().is_none());
    }

    #[test]
    fn test_size_rejects_zero() {
        assert!(RenderContext::with_sink(CaptureSink::new()).size(0, 10).is_err());
        let ctx = RenderContext::with_sink(CaptureSink::new()).size(320, 200).unwrap();
        assert_eq!(ctx.dimensions(), (320, 200));
    }

    #[test]
    fn test_failed_registration_keeps_state() {
        let mut ctx = RenderContext::with_sink(CaptureSink::new());
        let err = ctx.register_font("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, Error::ResourceLoad { .. }));
        assert!(ctx.font().is_none());
    }

    /// Two copies of a system font under distinct file names, so each loads
    /// with its own family.
    fn two_fonts(dir: &Path) -> Option<(PathBuf, PathBuf)> {
        let source = crate::font::system_font_path()?;
        let (a, b) = (dir.join("font_a.ttf"), dir.join("font_b.ttf"));
        std::fs::copy(&source, &a).unwrap();
        std::fs::copy(&source, &b).unwrap();
        Some((a, b))
    }

    #[test]
    fn test_last_registration_wins() {
        let dir = tempfile::tempdir().unwrap();
        let Some((a, b)) = two_fonts(dir.path()) else { return };
        let mut ctx = RenderContext::with_sink(CaptureSink::new());

        let first = ctx.register_font(&a).unwrap();
        assert_eq!(first.family(), "font_a");
        ctx.register_font(&b).unwrap();
        assert_eq!(ctx.font().unwrap().family(), "font_b");

        // a failed load leaves font_b active
        assert!(ctx.register_font(dir.path().join("missing.ttf")).is_err());
        assert_eq!(ctx.font().unwrap().family(), "font_b");
    }

    #[test]
    fn test_from_config_loads_font() {
        let dir = tempfile::tempdir().unwrap();
        let Some((a, _)) = two_fonts(dir.path()) else { return };
        let mut config = EdaConfig::default();
        config.font.path = Some(a);
        config.font.family = Some("IPAexGothic".to_string());

        let ctx = RenderContext::from_config(&config).unwrap();
        assert_eq!(ctx.font().unwrap().family(), "IPAexGothic");
    }

    #[test]
    fn test_from_config_with_missing_font() {
        let mut config = EdaConfig::default();
        config.font.path = Some("/nonexistent/font.ttf".into());
        assert!(matches!(RenderContext::from_config(&config), Err(Error::ResourceLoad { .. })));
    }

    #[test]
    fn test_from_config_size() {
        let mut config = EdaConfig::default();
        config.figure.width = 640;
        config.figure.height = 480;
        let ctx = RenderContext::from_config(&config).unwrap();
        assert_eq!(ctx.dimensions(), (640, 480));
    }
}
