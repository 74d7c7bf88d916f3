//! Dual raster/vector drawing surface.
//!
//! Plots draw through a [`Canvas`], which mirrors every call into a
//! [`Framebuffer`] and an [`SvgEncoder`] so both renderings stay in step.
//! Coordinates are pixels from the top-left corner.

use super::primitives::{draw_circle_outline, draw_dashed_line, draw_line, draw_rect, draw_rect_outline};
use crate::color::Rgba;
use crate::error::Result;
use crate::figure::{Figure, FigureKind};
use crate::font::FontResource;
use crate::framebuffer::Framebuffer;
use crate::output::{SvgEncoder, TextAnchor};
use std::sync::Arc;

/// Drawing surface that produces a [`Figure`].
#[derive(Debug)]
pub struct Canvas {
    fb: Framebuffer,
    svg: SvgEncoder,
    font: Option<Arc<FontResource>>,
}

impl Canvas {
    /// White canvas of the given size. Text is rasterized with `font` when
    /// present; vector output always carries text.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(width: u32, height: u32, font: Option<Arc<FontResource>>) -> Result<Self> {
        let mut fb = Framebuffer::new(width, height)?;
        fb.clear(Rgba::WHITE);
        let mut svg = SvgEncoder::new(width, height);
        if let Some(font) = &font {
            svg = svg.font(font.family(), Some(font.svg_font_face()));
        }
        Ok(Self { fb, svg, font })
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.fb.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.fb.height()
    }

    /// Width of `text` at `px`, estimated at 0.6 em per char without a font.
    #[must_use]
    pub fn measure(&self, text: &str, px: f32) -> f32 {
        match &self.font {
            Some(font) => font.measure(text, px),
            None => text.chars().count() as f32 * px * 0.6,
        }
    }

    /// Filled rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let (px, py) = (x.round() as i32, y.round() as i32);
        let (pw, ph) = ((x + w).round() as i32 - px, (y + h).round() as i32 - py);
        if pw > 0 && ph > 0 {
            draw_rect(&mut self.fb, px, py, pw as u32, ph as u32, color);
        }
        self.svg.rect(x, y, w, h, color);
    }

    /// One-pixel rectangle outline, optionally filled.
    pub fn rect_outline(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Option<Rgba>, stroke: Rgba) {
        let (px, py) = (x.round() as i32, y.round() as i32);
        let (pw, ph) = ((x + w).round() as i32 - px, (y + h).round() as i32 - py);
        if pw > 0 && ph > 0 {
            if let Some(fill) = fill {
                draw_rect(&mut self.fb, px, py, pw as u32, ph as u32, fill);
            }
            draw_rect_outline(&mut self.fb, px, py, pw as u32, ph as u32, stroke, 1);
        }
        self.svg.rect_outlined(x, y, w, h, fill, stroke, 1.0);
    }

    /// Solid line, `width` pixels thick.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgba, width: u32) {
        let horizontal = (y2 - y1).abs() < (x2 - x1).abs();
        for i in 0..width.max(1) as i32 {
            let (ox, oy) = if horizontal { (0, i) } else { (i, 0) };
            draw_line(
                &mut self.fb,
                x1.round() as i32 + ox,
                y1.round() as i32 + oy,
                x2.round() as i32 + ox,
                y2.round() as i32 + oy,
                color,
            );
        }
        self.svg.line(x1, y1, x2, y2, color, width as f32);
    }

    /// Dashed, alpha-blended line.
    pub fn dashed_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgba, dash: (usize, usize)) {
        draw_dashed_line(
            &mut self.fb,
            x1.round() as i32,
            y1.round() as i32,
            x2.round() as i32,
            y2.round() as i32,
            color,
            dash.0,
            dash.1,
        );
        self.svg.dashed_line(x1, y1, x2, y2, color, 1.0, (dash.0 as f32, dash.1 as f32));
    }

    /// Unfilled circle.
    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgba) {
        draw_circle_outline(&mut self.fb, cx.round() as i32, cy.round() as i32, r.round() as i32, color);
        self.svg.circle_outlined(cx, cy, r, color, 1.0);
    }

    /// Horizontal text, vertically centered on `y`.
    pub fn text(&mut self, x: f32, y: f32, text: &str, px: f32, color: Rgba, anchor: TextAnchor) {
        if let Some(font) = &self.font {
            font.draw_text(&mut self.fb, text, x, y, px, color, anchor);
        }
        self.svg.text(x, y, text, px, color, anchor);
    }

    /// Text reading bottom to top, centered on `(x, y)`.
    pub fn text_vertical(&mut self, x: f32, y: f32, text: &str, px: f32, color: Rgba) {
        if let Some(font) = &self.font {
            font.draw_text_vertical(&mut self.fb, text, x, y, px, color);
        }
        self.svg.text_rotated(x, y, text, px, color, TextAnchor::Middle, -90.0);
    }

    /// Finish drawing and package the result.
    #[must_use]
    pub fn into_figure(self, kind: FigureKind, title: String, x_label: String, y_label: String) -> Figure {
        Figure { kind, title, x_label, y_label, framebuffer: self.fb, svg: self.svg, font: self.font }
    }
}
