//! SVG output encoder.
//!
//! Every figure is drawn twice: into a raster framebuffer and into a vector
//! document built here. The vector form carries the figure's typeface as an
//! embedded `@font-face` block so text renders with the registered font.

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Family used when no font has been registered.
const GENERIC_FAMILY: &str = "sans-serif";

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// Font family applied to all text elements
    font_family: String,
    /// Optional `<style>` block, e.g. an embedded `@font-face`
    style: Option<String>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Circle
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Line, optionally dashed
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
        dash: Option<(f32, f32)>,
    },
    /// Text centered vertically on `y`, optionally rotated about its anchor point
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: f32,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            font_family: GENERIC_FAMILY.to_string(),
            style: None,
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Set the font family for text, plus an optional `<style>` block defining it.
    #[must_use]
    pub fn font(mut self, family: &str, style: Option<String>) -> Self {
        self.font_family = format!("'{}', {GENERIC_FAMILY}", escape(family));
        self.style = style;
        self
    }

    /// Add a filled rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
            stroke_width: 1.0,
        });
    }

    /// Add a rectangle with stroke.
    #[allow(clippy::too_many_arguments)]
    pub fn rect_outlined(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgba>,
        stroke: Rgba,
        stroke_width: f32,
    ) {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke: Some(stroke),
            stroke_width,
        });
    }

    /// Add an unfilled circle.
    pub fn circle_outlined(&mut self, cx: f32, cy: f32, r: f32, stroke: Rgba, stroke_width: f32) {
        self.elements.push(SvgElement::Circle {
            cx,
            cy,
            r,
            fill: None,
            stroke: Some(stroke),
            stroke_width,
        });
    }

    /// Add a solid line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32) {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width, dash: None });
    }

    /// Add a dashed line with `(dash, gap)` lengths.
    #[allow(clippy::too_many_arguments)]
    pub fn dashed_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
        dash: (f32, f32),
    ) {
        self.elements.push(SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
            dash: Some(dash),
        });
    }

    /// Add text with anchor.
    pub fn text(&mut self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba, anchor: TextAnchor) {
        self.text_rotated(x, y, text, font_size, fill, anchor, 0.0);
    }

    /// Add text rotated by `rotate` degrees about `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn text_rotated(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: f32,
    ) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            rotate,
        });
    }

    /// Elements added so far.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(style) = &self.style {
            let _ = writeln!(svg, "  {style}");
        }

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", self.element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }

    /// Convert an SVG element to its string representation.
    fn element_to_svg(&self, element: &SvgElement) -> String {
        match element {
            SvgElement::Rect { x, y, width, height, fill, stroke, stroke_width } => format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}"{}{}/>"#,
                fill_attr(*fill),
                stroke_attr(*stroke, *stroke_width)
            ),
            SvgElement::Circle { cx, cy, r, fill, stroke, stroke_width } => format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{r}"{}{}/>"#,
                fill_attr(*fill),
                stroke_attr(*stroke, *stroke_width)
            ),
            SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width, dash } => {
                let dash_attr = dash
                    .map(|(on, off)| format!(r#" stroke-dasharray="{on} {off}""#))
                    .unwrap_or_default();
                format!(
                    r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"{}{dash_attr}/>"#,
                    stroke_attr(Some(*stroke), *stroke_width)
                )
            }
            SvgElement::Text { x, y, text, font_size, fill, anchor, rotate } => {
                let transform = if rotate.abs() > f32::EPSILON {
                    format!(r#" transform="rotate({rotate} {x} {y})""#)
                } else {
                    String::new()
                };
                format!(
                    r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{}" dominant-baseline="middle" font-family="{}"{transform}>{}</text>"#,
                    fill.to_css(),
                    anchor.as_str(),
                    self.font_family,
                    escape(text)
                )
            }
        }
    }
}

fn fill_attr(fill: Option<Rgba>) -> String {
    match fill {
        Some(f) => format!(r#" fill="{}""#, f.to_css()),
        None => r#" fill="none""#.to_string(),
    }
}

fn stroke_attr(stroke: Option<Rgba>, width: f32) -> String {
    stroke
        .map(|s| format!(r#" stroke="{}" stroke-width="{width}""#, s.to_css()))
        .unwrap_or_default()
}

/// Escape XML special characters.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();

        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_svg_rect() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.rect(10.0, 20.0, 30.0, 40.0, Rgba::RED);
        let svg = enc.render();

        assert!(svg.contains("x=\"10\""));
        assert!(svg.contains("width=\"30\""));
        assert!(svg.contains("rgb(255,0,0)"));
    }

    #[test]
    fn test_svg_unfilled_shapes() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.rect_outlined(0.0, 0.0, 5.0, 5.0, None, Rgba::BLACK, 1.0);
        enc.circle_outlined(50.0, 50.0, 3.0, Rgba::BLACK, 1.0);
        let svg = enc.render();

        assert_eq!(svg.matches("fill=\"none\"").count(), 2);
        assert!(svg.contains("<circle cx=\"50\""));
    }

    #[test]
    fn test_svg_dashed_translucent_line() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.dashed_line(0.0, 0.0, 100.0, 0.0, Rgba::LIGHT_GREY.with_opacity(0.5), 1.0, (4.0, 2.0));
        let svg = enc.render();

        assert!(svg.contains("stroke-dasharray=\"4 2\""));
        assert!(svg.contains("rgba(176,176,176,0.502)"));
    }

    #[test]
    fn test_svg_text_escaped_and_rotated() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.text(10.0, 10.0, "a<b & c", 12.0, Rgba::BLACK, TextAnchor::Middle);
        enc.text_rotated(5.0, 50.0, "年齢", 12.0, Rgba::BLACK, TextAnchor::Middle, -90.0);
        let svg = enc.render();

        assert!(svg.contains("a&lt;b &amp; c"));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("rotate(-90 5 50)"));
        assert!(svg.contains(">年齢</text>"));
        assert!(svg.contains("font-family=\"sans-serif\""));
    }

    #[test]
    fn test_svg_font_family_and_style() {
        let mut enc = SvgEncoder::new(10, 10)
            .font("ipaexg", Some("<style>@font-face{}</style>".to_string()));
        enc.text(0.0, 0.0, "x", 10.0, Rgba::BLACK, TextAnchor::Start);
        let svg = enc.render();

        assert!(svg.contains("<style>@font-face{}</style>"));
        assert!(svg.contains("font-family=\"'ipaexg', sans-serif\""));
    }

    #[test]
    fn test_transparent_background() {
        let svg = SvgEncoder::new(10, 10).background(None).render();
        assert!(!svg.contains("height=\"100%\""));
    }
}
