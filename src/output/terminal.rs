//! Terminal output encoder.
//!
//! Draws a framebuffer as text so figures can be "shown" without a window:
//! - `Ascii`: grayscale ramp ` .:-=+*#%@`, readable in any log
//! - `UnicodeHalfBlock`: `▀` with 24-bit foreground/background, two pixel rows per line

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use std::fmt::Write as FmtWrite;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    Ascii,
    /// Unicode half-block characters with ANSI true color
    #[default]
    UnicodeHalfBlock,
}

/// Terminal encoder configuration.
#[derive(Debug, Clone)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    width: u32,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// ASCII grayscale ramp from dark to light.
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Default width in character cells.
    pub const DEFAULT_WIDTH: u32 = 100;

    /// Create a new terminal encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { mode: TerminalMode::default(), width: Self::DEFAULT_WIDTH }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the target width in characters (at least 1).
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = width.max(1);
        self
    }

    /// Render a framebuffer to a string.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        let cols = self.width.min(fb.width());
        // character cells are roughly twice as tall as wide
        let aspect = fb.height() as f32 / fb.width() as f32;
        let rows = ((cols as f32 * aspect / 2.0).round() as u32).max(1);
        let scale_x = fb.width() as f32 / cols as f32;

        let mut out = String::new();
        match self.mode {
            TerminalMode::Ascii => {
                let scale_y = fb.height() as f32 / rows as f32;
                for y in 0..rows {
                    for x in 0..cols {
                        let px = sample(fb, x as f32 * scale_x, y as f32 * scale_y);
                        out.push(Self::ramp(px.luminance()));
                    }
                    out.push('\n');
                }
            }
            TerminalMode::UnicodeHalfBlock => {
                let half_rows = rows * 2;
                let scale_y = fb.height() as f32 / half_rows as f32;
                for y in (0..half_rows).step_by(2) {
                    for x in 0..cols {
                        let fx = x as f32 * scale_x;
                        let top = sample(fb, fx, y as f32 * scale_y);
                        let bottom = sample(fb, fx, (y + 1) as f32 * scale_y);
                        let _ = write!(
                            out,
                            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                            top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                        );
                    }
                    out.push_str("\x1b[0m\n");
                }
            }
        }
        out
    }

    fn ramp(luma: f32) -> char {
        let last = Self::ASCII_RAMP.len() - 1;
        let idx = (luma * last as f32).round() as usize;
        Self::ASCII_RAMP[idx.min(last)]
    }
}

/// Nearest-neighbour sample, clamped to the framebuffer.
fn sample(fb: &Framebuffer, fx: f32, fy: f32) -> Rgba {
    let x = (fx as u32).min(fb.width() - 1);
    let y = (fy as u32).min(fb.height() - 1);
    fb.get_pixel(x, y).unwrap_or(Rgba::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_white_is_brightest() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);

        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(5).render(&fb);
        assert!(output.chars().filter(|c| *c != '\n').all(|c| c == '@'));
    }

    #[test]
    fn test_ascii_black_is_blank() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::BLACK);

        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(5).render(&fb);
        assert!(output.chars().filter(|c| *c != '\n').all(|c| c == ' '));
    }

    #[test]
    fn test_half_block_contains_ansi() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::RED);

        let output = TerminalEncoder::new().width(5).render(&fb);
        assert!(output.contains("\x1b[38;2;255;0;0m"));
        assert!(output.contains('▀'));
        assert!(output.ends_with("\x1b[0m\n"));
    }

    #[test]
    fn test_aspect_ratio() {
        let fb = Framebuffer::new(200, 100).unwrap();
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(40).render(&fb);
        let lines: Vec<&str> = output.lines().collect();

        // 2:1 image, 2:1 cells: 40 columns -> 10 lines
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0].chars().count(), 40);
    }

    #[test]
    fn test_width_capped_at_framebuffer() {
        let fb = Framebuffer::new(8, 8).unwrap();
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(500).render(&fb);
        assert_eq!(output.lines().next().map(|l| l.chars().count()), Some(8));
    }
}
