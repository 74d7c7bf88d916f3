//! Order statistics shared by the summary table and the box plot.

use std::cmp::Ordering;

/// Sort finite values ascending, dropping NaN and infinities.
#[must_use]
pub fn sorted_finite(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Sort values ascending, dropping only NaN; infinities stay at the ends.
#[must_use]
pub fn sorted_non_nan(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Percentile `p` (0-100) of sorted data using linear interpolation between
/// the closest ranks. `NaN` for empty input.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let k = (p / 100.0) * (n - 1) as f64;
            let f = k.floor() as usize;
            let c = k.ceil() as usize;
            if f == c || c >= n {
                return sorted[f.min(n - 1)];
            }
            let (lo, hi) = (sorted[f], sorted[c]);
            // equal infinities would interpolate to NaN
            if lo.total_cmp(&hi).is_eq() {
                return lo;
            }
            lo + (hi - lo) * (k - f as f64)
        }
    }
}

/// Arithmetic mean, `NaN` for empty input.
#[must_use]
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample standard deviation (n - 1 denominator), `NaN` below two values.
#[must_use]
pub fn sample_std(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    (ss / (data.len() - 1) as f64).sqrt()
}
