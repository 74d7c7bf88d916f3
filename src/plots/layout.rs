//! Shared figure layout: margins, title, axis labels, tick placement.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::output::TextAnchor;
use crate::render::Canvas;

pub(crate) const TITLE_PX: f32 = 18.0;
pub(crate) const LABEL_PX: f32 = 14.0;
pub(crate) const TICK_PX: f32 = 12.0;

const TITLE_BAND: f32 = 48.0;
const TICK_GAP: f32 = 6.0;

/// Inner rectangle where data is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlotArea {
    pub(crate) left: f32,
    pub(crate) top: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl PlotArea {
    /// Area left after reserving room for the title, the x axis (`bottom`),
    /// y tick labels `y_tick_width` wide, and `right` extra pixels.
    pub(crate) fn new(canvas: &Canvas, y_tick_width: f32, bottom: f32, right: f32) -> Result<Self> {
        let left = y_tick_width + TICK_GAP + LABEL_PX * 2.5;
        let width = canvas.width() as f32 - left - right;
        let height = canvas.height() as f32 - TITLE_BAND - bottom;
        if width < 1.0 || height < 1.0 {
            return Err(Error::Rendering(format!(
                "plot area too small for {}x{} figure",
                canvas.width(),
                canvas.height()
            )));
        }
        Ok(Self { left, top: TITLE_BAND, width, height })
    }

    pub(crate) fn right(&self) -> f32 {
        self.left + self.width
    }

    pub(crate) fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Title above the plot area, x label below it, y label rotated at the left edge.
pub(crate) fn draw_titles(canvas: &mut Canvas, area: &PlotArea, title: &str, x_label: &str, y_label: &str) {
    let center_x = area.left + area.width / 2.0;
    canvas.text(center_x, TITLE_BAND / 2.0, title, TITLE_PX, Rgba::BLACK, TextAnchor::Middle);
    let x_label_y = (area.bottom() + TICK_PX * 2.0 + LABEL_PX * 1.5).min(canvas.height() as f32 - LABEL_PX);
    canvas.text(center_x, x_label_y, x_label, LABEL_PX, Rgba::BLACK, TextAnchor::Middle);
    canvas.text_vertical(LABEL_PX, area.top + area.height / 2.0, y_label, LABEL_PX, Rgba::BLACK);
}

/// Category tick labels centered under each slot of the x axis.
pub(crate) fn draw_x_ticks(canvas: &mut Canvas, area: &PlotArea, labels: &[String]) {
    let slot = area.width / labels.len().max(1) as f32;
    let y = area.bottom() + TICK_GAP + TICK_PX / 2.0;
    for (i, label) in labels.iter().enumerate() {
        let x = area.left + slot * (i as f32 + 0.5);
        canvas.line(x, area.bottom(), x, area.bottom() + TICK_GAP / 2.0, Rgba::DARK_GREY, 1);
        canvas.text(x, y, label, TICK_PX, Rgba::BLACK, TextAnchor::Middle);
    }
}

/// Tick label right-aligned against the y axis at pixel row `y`.
pub(crate) fn draw_y_tick(canvas: &mut Canvas, area: &PlotArea, y: f32, label: &str) {
    canvas.line(area.left - TICK_GAP / 2.0, y, area.left, y, Rgba::DARK_GREY, 1);
    canvas.text(area.left - TICK_GAP, y, label, TICK_PX, Rgba::BLACK, TextAnchor::End);
}

/// Widest of `labels` at tick size.
pub(crate) fn max_label_width(canvas: &Canvas, labels: &[String]) -> f32 {
    labels.iter().map(|l| canvas.measure(l, TICK_PX)).fold(0.0, f32::max)
}

/// Round tick values (steps of 1, 2, or 5 × 10ⁿ) covering `[min, max]`,
/// roughly `target` of them.
pub(crate) fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return vec![min];
    }
    let raw = (max - min) / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Whether `lo` and `hi` are equal up to rounding at their magnitude.
pub(crate) fn is_flat(lo: f64, hi: f64) -> bool {
    hi - lo <= lo.abs().max(hi.abs()) * 4.0 * f64::EPSILON
}

/// Extent `[lo, hi]` made drawable: a flat extent is widened around its value
/// by 0.1% of its magnitude, at least 0.5. Other extents pass through.
pub(crate) fn widen_flat(lo: f64, hi: f64) -> (f64, f64) {
    if !is_flat(lo, hi) {
        return (lo, hi);
    }
    let pad = (lo.abs().max(hi.abs()) * 1e-3).max(0.5);
    (lo - pad, hi + pad)
}

/// Format a tick value with as many decimals as `step` needs.
pub(crate) fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 { 0 } else { (-step.log10().floor()) as usize };
    // avoid "-0"
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(3.0, 97.0, 5), vec![20.0, 40.0, 60.0, 80.0]);
        assert_eq!(nice_ticks(5.0, 5.0, 5), vec![5.0]);
    }

    #[test]
    fn test_widen_flat() {
        assert_eq!(widen_flat(4.0, 4.0), (3.5, 4.5));
        assert_eq!(widen_flat(1.7e9, 1.7e9), (1.7e9 - 1.7e6, 1.7e9 + 1.7e6));
        // small but distinct values keep their spread
        assert_eq!(widen_flat(1e-9, 2e-9), (1e-9, 2e-9));
        assert_eq!(widen_flat(1e8, 1e8 + 3.0), (1e8, 1e8 + 3.0));
        assert!(is_flat(0.0, 0.0));
        assert!(!is_flat(0.0, 1e-300));
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(20.0, 20.0), "20");
        assert_eq!(format_tick(0.5, 0.5), "0.5");
        assert_eq!(format_tick(-1e-17, 0.2), "0.0");
    }

    #[test]
    fn test_plot_area_too_small() {
        let canvas = Canvas::new(40, 40, None).unwrap();
        assert!(matches!(PlotArea::new(&canvas, 10.0, 60.0, 0.0), Err(Error::Rendering(_))));
    }

    #[test]
    fn test_plot_area_bounds() {
        let canvas = Canvas::new(1000, 600, None).unwrap();
        let area = PlotArea::new(&canvas, 20.0, 60.0, 100.0).unwrap();
        assert!(area.left > 20.0);
        assert!(area.right() <= 900.0);
        assert!((area.bottom() - 540.0).abs() < 1e-4);
    }
}
