//! Two-way frequency tables of categorical columns.

use crate::data::{Category, Dataset};
use crate::error::Result;
use std::collections::BTreeMap;

/// Which numbers a cross-tabulation presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossTabValues {
    /// Raw co-occurrence counts.
    #[default]
    Counts,
    /// Row-normalized percentages; every row with a nonzero total sums to 100.
    Percentages,
}

/// Counts of co-occurring values of two columns.
///
/// Rows are the distinct values of the first column, columns the distinct values
/// of the second, both in ascending natural order. Dataset rows where either
/// value is missing are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    row_labels: Vec<Category>,
    col_labels: Vec<Category>,
    /// Row-major counts.
    counts: Vec<u64>,
}

impl CrossTab {
    /// Cross-tabulate `col1` (rows) against `col2` (columns).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`](crate::Error::MissingColumn) if either
    /// column is absent.
    pub fn from_columns(dataset: &Dataset, col1: &str, col2: &str) -> Result<Self> {
        let a = dataset.column(col1)?;
        let b = dataset.column(col2)?;

        let mut pairs: BTreeMap<(Category, Category), u64> = BTreeMap::new();
        for (va, vb) in a.values().iter().zip(b.values()) {
            if let (Some(ka), Some(kb)) = (Category::new(va), Category::new(vb)) {
                *pairs.entry((ka, kb)).or_insert(0) += 1;
            }
        }

        let row_labels: Vec<Category> = {
            let mut v: Vec<Category> = pairs.keys().map(|(r, _)| r.clone()).collect();
            v.dedup();
            v
        };
        let col_labels: Vec<Category> = {
            let mut v: Vec<Category> = pairs.keys().map(|(_, c)| c.clone()).collect();
            v.sort();
            v.dedup();
            v
        };

        let mut counts = vec![0u64; row_labels.len() * col_labels.len()];
        for ((r, c), n) in pairs {
            // labels were built from these keys, so both searches succeed
            if let (Ok(ri), Ok(ci)) = (row_labels.binary_search(&r), col_labels.binary_search(&c)) {
                counts[ri * col_labels.len() + ci] = n;
            }
        }

        tracing::debug!(
            rows = row_labels.len(),
            cols = col_labels.len(),
            col1,
            col2,
            "cross-tabulated"
        );
        Ok(Self { row_labels, col_labels, counts })
    }

    /// Number of rows (distinct values of the first column).
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of columns (distinct values of the second column).
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.col_labels.len()
    }

    /// Whether no dataset row had both values present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Row labels in order.
    #[must_use]
    pub fn row_labels(&self) -> &[Category] {
        &self.row_labels
    }

    /// Column labels in order.
    #[must_use]
    pub fn col_labels(&self) -> &[Category] {
        &self.col_labels
    }

    /// Row-major counts.
    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Count at `(row, col)`.
    #[must_use]
    pub fn count(&self, row: usize, col: usize) -> Option<u64> {
        (row < self.n_rows() && col < self.n_cols()).then(|| self.counts[row * self.n_cols() + col])
    }

    /// Count for a pair of labels.
    #[must_use]
    pub fn count_for(&self, row_label: &str, col_label: &str) -> Option<u64> {
        let r = self.row_labels.iter().position(|l| l.label() == row_label)?;
        let c = self.col_labels.iter().position(|l| l.label() == col_label)?;
        self.count(r, c)
    }

    /// Sum of one row.
    #[must_use]
    pub fn row_total(&self, row: usize) -> u64 {
        self.row(row).iter().sum()
    }

    /// Sum of all cells.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn row(&self, row: usize) -> &[u64] {
        let n = self.n_cols();
        self.counts.get(row * n..(row + 1) * n).unwrap_or(&[])
    }

    /// `100 × cell ÷ row total`, row-major.
    ///
    /// A row whose total is zero yields `NaN` cells; they are not replaced.
    #[must_use]
    pub fn row_percentages(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.counts.len());
        for r in 0..self.n_rows() {
            let total = self.row_total(r) as f64;
            if total == 0.0 {
                tracing::warn!(row = %self.row_labels[r], "zero row total; percentages undefined");
            }
            out.extend(self.row(r).iter().map(|&n| n as f64 / total * 100.0));
        }
        out
    }

    /// Cell values for the requested presentation, row-major.
    #[must_use]
    pub fn values(&self, mode: CrossTabValues) -> Vec<f64> {
        match mode {
            CrossTabValues::Counts => self.counts.iter().map(|&n| n as f64).collect(),
            CrossTabValues::Percentages => self.row_percentages(),
        }
    }
}
