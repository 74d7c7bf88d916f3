//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color).

use crate::color::Rgba;
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale from data values to pixel positions.
///
/// The domain stays in `f64` so large-magnitude data (timestamps, ids) keeps
/// its spread; only the mapped position is narrowed to `f32`.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain ends are equal or not finite.
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain(format!("Domain must be finite, got {domain:?}")));
        }
        if is_empty_domain(domain.0, domain.1) {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 })
    }
}

impl Scale<f64, f32> for LinearScale {
    fn scale(&self, value: f64) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t as f32 * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Equal (or unordered) domain ends: nothing to interpolate between.
fn is_empty_domain<T: PartialOrd>(a: T, b: T) -> bool {
    matches!(a.partial_cmp(&b), Some(Ordering::Equal) | None)
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }

        if is_empty_domain(domain.0, domain.1) {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }

    /// Diverging red-yellow-blue scale, reversed: low values blue, high values red.
    ///
    /// Stops are the 11-class ColorBrewer RdYlBu palette.
    #[must_use]
    pub fn rd_yl_bu_r(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(49, 54, 149),
                Rgba::rgb(69, 117, 180),
                Rgba::rgb(116, 173, 209),
                Rgba::rgb(171, 217, 233),
                Rgba::rgb(224, 243, 248),
                Rgba::rgb(255, 255, 191),
                Rgba::rgb(254, 224, 144),
                Rgba::rgb(253, 174, 97),
                Rgba::rgb(244, 109, 67),
                Rgba::rgb(215, 48, 39),
                Rgba::rgb(165, 0, 38),
            ],
            domain,
        )
        .ok()
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f32).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert!((scale.scale(0.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(50.0) - 0.5).abs() < 0.001);
        assert!((scale.scale(100.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        // pixel rows grow downward
        let scale = LinearScale::new((0.0, 10.0), (500.0, 100.0)).unwrap();
        assert!((scale.scale(10.0) - 100.0).abs() < 0.001);
        assert!((scale.scale(0.0) - 500.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_equal_domain_error() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((f64::NAN, 1.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_linear_scale_large_magnitude_domain() {
        // adjacent in f64, identical in f32
        let scale = LinearScale::new((1.7e9 - 0.5, 1.7e9 + 0.5), (400.0, 0.0)).unwrap();
        assert!((scale.scale(1.7e9) - 200.0).abs() < 0.001);
        assert!((scale.scale(1.7e9 + 0.5)).abs() < 0.001);
    }

    #[test]
    fn test_color_scale_tiny_domain() {
        let scale = ColorScale::rd_yl_bu_r((1e-9, 2e-9)).expect("distinct ends form a domain");
        assert_eq!(scale.scale(1e-9), Rgba::rgb(49, 54, 149));
        assert_eq!(scale.scale(2e-9), Rgba::rgb(165, 0, 38));
    }

    #[test]
    fn test_rd_yl_bu_r_endpoints() {
        let scale = ColorScale::rd_yl_bu_r((0.0, 100.0)).expect("operation should succeed");
        assert_eq!(scale.scale(0.0), Rgba::rgb(49, 54, 149));
        assert_eq!(scale.scale(50.0), Rgba::rgb(255, 255, 191));
        assert_eq!(scale.scale(100.0), Rgba::rgb(165, 0, 38));
        // out-of-domain values clamp
        assert_eq!(scale.scale(-5.0), Rgba::rgb(49, 54, 149));
        assert!(ColorScale::rd_yl_bu_r((5.0, 5.0)).is_none());
    }

    #[test]
    fn test_color_scale_single_color() {
        let scale = ColorScale::new(vec![Rgba::RED], (0.0, 1.0)).unwrap();
        assert_eq!(scale.scale(0.5), Rgba::RED);
    }

    #[test]
    fn test_color_scale_invalid() {
        assert!(ColorScale::new(vec![], (0.0, 1.0)).is_err());
        assert!(ColorScale::new(vec![Rgba::RED, Rgba::BLUE], (5.0, 5.0)).is_err());
    }
}
