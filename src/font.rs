//! Font resources.
//!
//! A [`FontResource`] is a TrueType/OpenType file parsed with `ab_glyph`. It
//! rasterizes annotation and label text into framebuffers and embeds itself into
//! SVG output as a base64 `@font-face` data URI.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::TextAnchor;
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;
use std::path::{Path, PathBuf};

/// Font used when callers do not name one: the IPAex Gothic file shipped
/// next to the analysis notebooks, which covers Japanese titles.
pub const DEFAULT_FONT_PATH: &str = "../data/ipaexg.ttf";

/// A loaded, parsed typeface.
pub struct FontResource {
    path: PathBuf,
    family: String,
    font: FontVec,
}

impl fmt::Debug for FontResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontResource")
            .field("path", &self.path)
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl FontResource {
    /// Load and parse a font file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceLoad`] if the file cannot be read or is not a
    /// font `ab_glyph` can parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::ResourceLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(path, bytes)
    }

    /// Parse font bytes; `path` only names the resource in errors and the family.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceLoad`] if the bytes are not a parsable font.
    pub fn from_bytes(path: impl AsRef<Path>, bytes: Vec<u8>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let font = FontVec::try_from_vec(bytes).map_err(|e| Error::ResourceLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let family = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "embedded".to_string());

        tracing::debug!(path = %path.display(), %family, glyphs = font.glyph_count(), "font loaded");
        Ok(Self { path, family, font })
    }

    /// Override the family name used in vector output.
    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Family name used in vector output.
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// File the font was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Advance width of `text` at `px` pixels, including kerning.
    #[must_use]
    pub fn measure(&self, text: &str, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut width = 0.0;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    /// Draw `text` horizontally. `y` is the vertical middle of the line; `x` is
    /// interpreted according to `anchor`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &self,
        fb: &mut Framebuffer,
        text: &str,
        x: f32,
        y: f32,
        px: f32,
        color: Rgba,
        anchor: TextAnchor,
    ) {
        let left = x - anchor_offset(self.measure(text, px), anchor);
        self.rasterize(text, px, |dx, dy, coverage| {
            let (fx, fy) = ((left + dx).round(), (y + dy).round());
            if fx >= 0.0 && fy >= 0.0 {
                fb.blend_coverage(fx as u32, fy as u32, color, coverage);
            }
        });
    }

    /// Draw `text` rotated 90° counter-clockwise (reading bottom to top),
    /// centered on `(x, y)`.
    pub fn draw_text_vertical(&self, fb: &mut Framebuffer, text: &str, x: f32, y: f32, px: f32, color: Rgba) {
        let half = self.measure(text, px) / 2.0;
        self.rasterize(text, px, |dx, dy, coverage| {
            let (fx, fy) = ((x + dy).round(), (y + half - dx).round());
            if fx >= 0.0 && fy >= 0.0 {
                fb.blend_coverage(fx as u32, fy as u32, color, coverage);
            }
        });
    }

    /// `<style>` block declaring this font as an embedded `@font-face`.
    #[must_use]
    pub fn svg_font_face(&self) -> String {
        let data = STANDARD.encode(self.font.as_slice());
        format!(
            "<style>@font-face {{ font-family: '{}'; src: url('data:font/ttf;base64,{data}') format('truetype'); }}</style>",
            self.family.replace('\'', "")
        )
    }

    /// Lay out `text` from the origin and report glyph coverage at pixel offsets
    /// relative to (left edge, vertical middle).
    fn rasterize(&self, text: &str, px: f32, mut plot: impl FnMut(f32, f32, f32)) {
        let scale = PxScale::from(px);
        let scaled = self.font.as_scaled(scale);
        let baseline = (scaled.ascent() + scaled.descent()) / 2.0;

        let mut caret = 0.0;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            prev = Some(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    plot(bounds.min.x + gx as f32, bounds.min.y + gy as f32, coverage);
                });
            }
        }
    }
}

/// Distance from the anchor point to the left edge of text `width` wide.
fn anchor_offset(width: f32, anchor: TextAnchor) -> f32 {
    match anchor {
        TextAnchor::Start => 0.0,
        TextAnchor::Middle => width / 2.0,
        TextAnchor::End => width,
    }
}

/// TrueType fonts commonly installed on Linux hosts, for tests that need a
/// real typeface. Tests skip themselves when none is present.
#[cfg(test)]
pub(crate) fn system_font_path() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/Library/Fonts/Arial Unicode.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.is_file())
}
