//! Box-and-whisker statistics and categorical grouping.

use super::quantile::{percentile, sorted_finite};
use crate::data::{Category, Dataset};
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Statistics computed for one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Lower whisker end: smallest value within `Q1 - 1.5 * IQR`.
    pub min: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    /// Upper whisker end: largest value within `Q3 + 1.5 * IQR`.
    pub max: f64,
    /// Interquartile range (Q3 - Q1).
    pub iqr: f64,
    /// Values beyond the whiskers.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Compute box statistics with the 1.5 × IQR outlier rule.
    ///
    /// Returns `None` when there are no finite values.
    #[must_use]
    pub fn from_data(data: &[f64]) -> Option<Self> {
        let sorted = sorted_finite(data);
        let (first, last) = (*sorted.first()?, *sorted.last()?);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let min = sorted.iter().copied().find(|&x| x >= lower_fence).unwrap_or(first);
        let max = sorted.iter().rev().copied().find(|&x| x <= upper_fence).unwrap_or(last);
        let outliers = sorted.iter().copied().filter(|&x| x < lower_fence || x > upper_fence).collect();

        Some(Self { min, q1, median, q3, max, iqr, outliers })
    }

    /// Smallest value drawn (whisker or outlier).
    #[must_use]
    pub fn lowest(&self) -> f64 {
        self.outliers.iter().copied().fold(self.min, f64::min)
    }

    /// Largest value drawn (whisker or outlier).
    #[must_use]
    pub fn highest(&self) -> f64 {
        self.outliers.iter().copied().fold(self.max, f64::max)
    }
}

/// Numeric values of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Category value.
    pub label: Category,
    /// Present numeric values, in row order.
    pub values: Vec<f64>,
}

/// Split `num` by the distinct values of `cat`, ascending.
///
/// Rows with a missing category are dropped. A category whose numeric values
/// are all missing is kept with an empty group.
///
/// # Errors
///
/// Returns [`Error::MissingColumn`] if either column is absent and
/// [`Error::ColumnType`] if `num` is not numeric.
pub fn group_by_category(dataset: &Dataset, cat: &str, num: &str) -> Result<Vec<Group>> {
    let cat_col = dataset.column(cat)?;
    let num_col = dataset.column(num)?;
    if !num_col.is_numeric() {
        return Err(Error::ColumnType { column: num.to_string(), expected: "numeric" });
    }

    let mut groups: BTreeMap<Category, Vec<f64>> = BTreeMap::new();
    for (c, v) in cat_col.values().iter().zip(num_col.values()) {
        if let Some(key) = Category::new(c) {
            let entry = groups.entry(key).or_default();
            if let Some(x) = v.as_f64() {
                entry.push(x);
            }
        }
    }

    Ok(groups.into_iter().map(|(label, values)| Group { label, values }).collect())
}
