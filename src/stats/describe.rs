//! Descriptive statistics over every column of a dataset.
//!
//! Numeric columns get count/mean/std/min/quartiles/max. Other columns get
//! count/unique/top/freq. Statistics outside a column's type render as `NaN`.

use super::quantile::{mean, percentile, sample_std, sorted_non_nan};
use crate::data::{Category, Column, Dataset, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A row of the statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    /// Non-missing entries.
    Count,
    /// Distinct non-missing values.
    Unique,
    /// Most frequent value.
    Top,
    /// Frequency of the top value.
    Freq,
    /// Mean.
    Mean,
    /// Sample standard deviation.
    Std,
    /// Minimum.
    Min,
    /// 25th percentile.
    Q25,
    /// Median.
    Q50,
    /// 75th percentile.
    Q75,
    /// Maximum.
    Max,
}

impl Stat {
    const CATEGORICAL: [Self; 3] = [Self::Unique, Self::Top, Self::Freq];
    const NUMERIC: [Self; 7] =
        [Self::Mean, Self::Std, Self::Min, Self::Q25, Self::Q50, Self::Q75, Self::Max];

    /// Row label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Unique => "unique",
            Self::Top => "top",
            Self::Freq => "freq",
            Self::Mean => "mean",
            Self::Std => "std",
            Self::Min => "min",
            Self::Q25 => "25%",
            Self::Q50 => "50%",
            Self::Q75 => "75%",
            Self::Max => "max",
        }
    }
}

/// Statistics for a non-numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    /// Distinct non-missing values.
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first.
    pub top: Option<Value>,
    /// Occurrences of `top`.
    pub freq: usize,
}

/// Statistics for a numeric column. Every field is `NaN` when the column has
/// no present values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    /// Mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub std: f64,
    /// Minimum.
    pub min: f64,
    /// 25th percentile.
    pub q25: f64,
    /// Median.
    pub q50: f64,
    /// 75th percentile.
    pub q75: f64,
    /// Maximum.
    pub max: f64,
}

/// Type-specific part of a column summary.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryKind {
    /// Numeric column.
    Numeric(NumericSummary),
    /// Non-numeric column.
    Categorical(CategoricalSummary),
}

/// Summary of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    /// Column name.
    pub name: String,
    /// Non-missing entries.
    pub count: usize,
    /// Type-specific statistics.
    pub kind: SummaryKind,
}

impl ColumnSummary {
    /// Summarize a single column.
    #[must_use]
    pub fn from_column(column: &Column) -> Self {
        let count = column.non_null().count();
        let kind = if column.is_numeric() {
            SummaryKind::Numeric(numeric_summary(&column.numeric_values()))
        } else {
            SummaryKind::Categorical(categorical_summary(column))
        };
        Self { name: column.name().to_string(), count, kind }
    }

    /// Rendered cell for `stat`; `NaN` when not applicable.
    #[must_use]
    pub fn cell(&self, stat: Stat) -> String {
        match (stat, &self.kind) {
            (Stat::Count, _) => fmt_float(self.count as f64),
            (Stat::Unique, SummaryKind::Categorical(c)) => c.unique.to_string(),
            (Stat::Top, SummaryKind::Categorical(c)) => {
                c.top.as_ref().map_or_else(|| "NaN".to_string(), ToString::to_string)
            }
            (Stat::Freq, SummaryKind::Categorical(c)) if c.top.is_some() => c.freq.to_string(),
            (Stat::Mean, SummaryKind::Numeric(n)) => fmt_float(n.mean),
            (Stat::Std, SummaryKind::Numeric(n)) => fmt_float(n.std),
            (Stat::Min, SummaryKind::Numeric(n)) => fmt_float(n.min),
            (Stat::Q25, SummaryKind::Numeric(n)) => fmt_float(n.q25),
            (Stat::Q50, SummaryKind::Numeric(n)) => fmt_float(n.q50),
            (Stat::Q75, SummaryKind::Numeric(n)) => fmt_float(n.q75),
            (Stat::Max, SummaryKind::Numeric(n)) => fmt_float(n.max),
            _ => "NaN".to_string(),
        }
    }
}

fn fmt_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.6}")
    }
}

fn numeric_summary(values: &[f64]) -> NumericSummary {
    let sorted = sorted_non_nan(values);
    NumericSummary {
        mean: mean(values),
        std: sample_std(values),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: percentile(&sorted, 25.0),
        q50: percentile(&sorted, 50.0),
        q75: percentile(&sorted, 75.0),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

fn categorical_summary(column: &Column) -> CategoricalSummary {
    // (count, first row seen) per category
    let mut counts: BTreeMap<Category, (usize, usize)> = BTreeMap::new();
    for (row, value) in column.values().iter().enumerate() {
        if let Some(cat) = Category::new(value) {
            counts.entry(cat).or_insert((0, row)).0 += 1;
        }
    }

    let top = counts
        .iter()
        .max_by(|(_, (ca, ra)), (_, (cb, rb))| ca.cmp(cb).then(rb.cmp(ra)))
        .map(|(cat, (count, _))| (cat.value().clone(), *count));

    CategoricalSummary {
        unique: counts.len(),
        freq: top.as_ref().map_or(0, |(_, c)| *c),
        top: top.map(|(v, _)| v),
    }
}

/// Descriptive-statistics table covering all columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    summaries: Vec<ColumnSummary>,
    stats: Vec<Stat>,
}

impl Describe {
    /// Summarize every column of `dataset`.
    ///
    /// Numeric rows are omitted when no column is numeric; unique/top/freq are
    /// omitted when every column is numeric.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let summaries: Vec<ColumnSummary> = dataset.iter().map(ColumnSummary::from_column).collect();
        let any_numeric = summaries.iter().any(|s| matches!(s.kind, SummaryKind::Numeric(_)));
        let any_categorical =
            summaries.iter().any(|s| matches!(s.kind, SummaryKind::Categorical(_)));

        let mut stats = vec![Stat::Count];
        if any_categorical {
            stats.extend(Stat::CATEGORICAL);
        }
        if any_numeric {
            stats.extend(Stat::NUMERIC);
        }
        Self { summaries, stats }
    }

    /// Rows of the table, in order.
    #[must_use]
    pub fn stats(&self) -> &[Stat] {
        &self.stats
    }

    /// Per-column summaries, in column order.
    #[must_use]
    pub fn summaries(&self) -> &[ColumnSummary] {
        &self.summaries
    }

    /// Summary for a named column.
    #[must_use]
    pub fn summary(&self, name: &str) -> Option<&ColumnSummary> {
        self.summaries.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for Describe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.stats.iter().map(|s| s.label().len()).max().unwrap_or(0);
        let cells: Vec<Vec<String>> = self
            .summaries
            .iter()
            .map(|s| self.stats.iter().map(|&stat| s.cell(stat)).collect())
            .collect();
        let widths: Vec<usize> = self
            .summaries
            .iter()
            .zip(&cells)
            .map(|(s, col)| {
                col.iter().map(|c| display_width(c)).chain([display_width(&s.name)]).max().unwrap_or(0)
            })
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (s, w) in self.summaries.iter().zip(&widths) {
            write!(f, "  {}", pad_left(&s.name, *w))?;
        }
        writeln!(f)?;

        for (row, stat) in self.stats.iter().enumerate() {
            write!(f, "{:<label_width$}", stat.label())?;
            for (col, w) in cells.iter().zip(&widths) {
                write!(f, "  {}", pad_left(&col[row], *w))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Terminal column width, counting East Asian wide characters as two cells.
pub(crate) fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| {
            let cp = c as u32;
            let wide = (0x1100..=0x115F).contains(&cp)
                || (0x2E80..=0xA4CF).contains(&cp)
                || (0xAC00..=0xD7A3).contains(&cp)
                || (0xF900..=0xFAFF).contains(&cp)
                || (0xFE30..=0xFE4F).contains(&cp)
                || (0xFF00..=0xFF60).contains(&cp)
                || (0xFFE0..=0xFFE6).contains(&cp);
            if wide {
                2
            } else {
                1
            }
        })
        .sum()
}

/// Right-align `s` to `width` terminal cells.
pub(crate) fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{s}", " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Dataset {
        Dataset::from_columns([
            Column::text("sex", &[Some("male"), Some("female"), Some("male"), None]),
            Column::float("fare", &[Some(7.25), Some(71.28), None, Some(8.05)]),
            Column::bool("alone", &[Some(true), Some(false), Some(true), Some(true)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_numeric_summary() {
        let d = Describe::from_dataset(&sample());
        let fare = d.summary("fare").unwrap();
        assert_eq!(fare.count, 3);
        let SummaryKind::Numeric(n) = fare.kind else { panic!("fare should be numeric") };
        assert_relative_eq!(n.mean, (7.25 + 71.28 + 8.05) / 3.0);
        assert_relative_eq!(n.min, 7.25);
        assert_relative_eq!(n.q50, 8.05);
        assert_relative_eq!(n.max, 71.28);
    }

    #[test]
    fn test_categorical_summary() {
        let d = Describe::from_dataset(&sample());
        let sex = d.summary("sex").unwrap();
        assert_eq!(sex.count, 3);
        assert_eq!(
            sex.kind,
            SummaryKind::Categorical(CategoricalSummary {
                unique: 2,
                top: Some(Value::from("male")),
                freq: 2,
            })
        );
        // bool columns are summarized like categories
        assert_eq!(d.summary("alone").unwrap().cell(Stat::Top), "True");
    }

    #[test]
    fn test_top_tie_goes_to_first_seen() {
        let ds = Dataset::from_columns([Column::text("c", &[Some("b"), Some("a"), Some("a"), Some("b")])])
            .unwrap();
        let d = Describe::from_dataset(&ds);
        assert_eq!(d.summary("c").unwrap().cell(Stat::Top), "b");
    }

    #[test]
    fn test_not_applicable_cells() {
        let d = Describe::from_dataset(&sample());
        assert_eq!(d.summary("sex").unwrap().cell(Stat::Mean), "NaN");
        assert_eq!(d.summary("fare").unwrap().cell(Stat::Top), "NaN");
        assert_eq!(d.stats().len(), 11);
    }

    #[test]
    fn test_rows_omitted_by_column_types() {
        let numeric_only =
            Dataset::from_columns([Column::int("n", &[Some(1), Some(2)])]).unwrap();
        let d = Describe::from_dataset(&numeric_only);
        assert!(!d.stats().contains(&Stat::Top));
        assert!(d.stats().contains(&Stat::Std));

        let text_only = Dataset::from_columns([Column::text("t", &[Some("x")])]).unwrap();
        let d = Describe::from_dataset(&text_only);
        assert_eq!(d.stats(), &[Stat::Count, Stat::Unique, Stat::Top, Stat::Freq]);
    }

    #[test]
    fn test_infinite_values_reach_order_statistics() {
        let ds = Dataset::from_columns([Column::float("x", &[Some(1.0), Some(f64::INFINITY), Some(3.0)])])
            .unwrap();
        let d = Describe::from_dataset(&ds);
        let x = d.summary("x").unwrap();
        assert_eq!(x.count, 3);
        let SummaryKind::Numeric(n) = &x.kind else { panic!("x should be numeric") };
        assert_eq!(n.mean, f64::INFINITY);
        assert_eq!(n.max, f64::INFINITY);
        assert_relative_eq!(n.min, 1.0);
        assert_relative_eq!(n.q50, 3.0);
        assert_eq!(x.cell(Stat::Max), "inf");
    }

    #[test]
    fn test_empty_column_is_nan() {
        let ds = Dataset::from_columns([Column::float("x", &[None, None])]).unwrap();
        let d = Describe::from_dataset(&ds);
        let x = d.summary("x").unwrap();
        assert_eq!(x.cell(Stat::Count), "0.000000");
        assert_eq!(x.cell(Stat::Mean), "NaN");
        assert_eq!(x.cell(Stat::Max), "NaN");
    }

    #[test]
    fn test_display_layout() {
        let text = Describe::from_dataset(&sample()).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].contains("sex") && lines[0].contains("fare"));
        assert!(lines[1].starts_with("count"));
        assert!(lines[11].starts_with("max"));
    }

    #[test]
    fn test_display_width_counts_wide_chars() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("地域"), 4);
        assert_eq!(pad_left("地域", 6), "  地域");
    }
}
