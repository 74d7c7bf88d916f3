//! Columnar dataset with ordered, typed columns.

use super::value::{Category, DType, Value};
use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// A named, typed column of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: DType,
    values: Vec<Value>,
}

impl Column {
    /// Create a column, checking every value against the declared type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnType`] if a value does not fit `dtype`.
    pub fn new(name: &str, dtype: DType, values: Vec<Value>) -> Result<Self> {
        if let Some(bad) = values.iter().find(|v| !dtype.admits(v)) {
            tracing::debug!(column = name, value = %bad, "value rejected by column type");
            return Err(Error::ColumnType {
                column: name.to_string(),
                expected: match dtype {
                    DType::Int64 => "int64",
                    DType::Float64 => "float64",
                    DType::Bool => "bool",
                    DType::Object => "object",
                },
            });
        }
        Ok(Self { name: name.to_string(), dtype, values })
    }

    /// Integer column; `None` entries are missing.
    #[must_use]
    pub fn int(name: &str, data: &[Option<i64>]) -> Self {
        Self::from_parts(name, DType::Int64, data.iter().map(|v| Value::from(*v)).collect())
    }

    /// Float column; `None` and `NaN` entries are missing.
    #[must_use]
    pub fn float(name: &str, data: &[Option<f64>]) -> Self {
        Self::from_parts(name, DType::Float64, data.iter().map(|v| Value::from(*v)).collect())
    }

    /// Boolean column; `None` entries are missing.
    #[must_use]
    pub fn bool(name: &str, data: &[Option<bool>]) -> Self {
        Self::from_parts(name, DType::Bool, data.iter().map(|v| Value::from(*v)).collect())
    }

    /// Text column; `None` entries are missing.
    #[must_use]
    pub fn text(name: &str, data: &[Option<&str>]) -> Self {
        Self::from_parts(name, DType::Object, data.iter().map(|v| Value::from(*v)).collect())
    }

    fn from_parts(name: &str, dtype: DType, values: Vec<Value>) -> Self {
        Self { name: name.to_string(), dtype, values }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub const fn dtype(&self) -> DType {
        self.dtype
    }

    /// Number of entries, missing ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All entries in row order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Entry at `row`.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Whether statistics treat this column as numeric.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.dtype.is_numeric()
    }

    /// Number of missing entries.
    #[must_use]
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Non-missing entries in row order.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_missing())
    }

    /// Non-missing numeric entries as `f64`.
    #[must_use]
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }

    /// Distinct non-missing values in ascending natural order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.values.iter().filter_map(Category::new).collect::<BTreeSet<_>>().into_iter().collect()
    }

    fn slice(&self, rows: usize) -> Self {
        Self::from_parts(&self.name, self.dtype, self.values[..rows.min(self.len())].to_vec())
    }
}

/// An ordered collection of equally long, uniquely named columns.
///
/// Operations only ever borrow a dataset; none of them mutate it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from columns.
    ///
    /// # Errors
    ///
    /// Fails on duplicate names or columns of differing length.
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let mut ds = Self::new();
        for column in columns {
            ds.push_column(column)?;
        }
        Ok(ds)
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateColumn`] if the name is taken and
    /// [`Error::DataLengthMismatch`] if the length differs from existing columns.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.has_column(column.name()) {
            return Err(Error::DuplicateColumn(column.name().to_string()));
        }
        if !self.columns.is_empty() && column.len() != self.n_rows {
            return Err(Error::DataLengthMismatch { expected: self.n_rows, actual: column.len() });
        }
        self.n_rows = column.len();
        self.columns.push(column);
        Ok(())
    }

    /// Builder form of [`Dataset::push_column`].
    ///
    /// # Errors
    ///
    /// Same as [`Dataset::push_column`].
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.push_column(column)?;
        Ok(self)
    }

    /// Look up a column by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if no column has that name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns.iter().find(|c| c.name() == name).ok_or_else(|| Error::missing_column(name))
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Iterate over columns in order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Number of rows.
    #[must_use]
    pub const fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Declared type of every column, in column order.
    #[must_use]
    pub fn dtypes(&self) -> Vec<(&str, DType)> {
        self.columns.iter().map(|c| (c.name(), c.dtype())).collect()
    }

    /// Missing-entry count of every column, in column order.
    #[must_use]
    pub fn null_counts(&self) -> Vec<(&str, usize)> {
        self.columns.iter().map(|c| (c.name(), c.null_count())).collect()
    }

    /// The first `n` rows (all rows if `n` exceeds the row count).
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.iter().map(|c| c.slice(n)).collect(),
            n_rows: n.min(self.n_rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_columns([
            Column::text("region", &[Some("A"), Some("B"), None]),
            Column::float("score", &[Some(1.5), None, Some(f64::NAN)]),
            Column::int("age", &[Some(30), Some(41), Some(22)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape_and_order() {
        let ds = sample();
        assert_eq!(ds.shape(), (3, 3));
        assert_eq!(ds.columns(), vec!["region", "score", "age"]);
    }

    #[test]
    fn test_missing_column() {
        let err = sample().column("nope").unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref name } if name == "nope"));
    }

    #[test]
    fn test_null_counts() {
        let ds = sample();
        assert_eq!(ds.null_counts(), vec![("region", 1), ("score", 2), ("age", 0)]);
    }

    #[test]
    fn test_head_clamps_to_row_count() {
        let ds = sample();
        assert_eq!(ds.head(5).nrow(), 3);
        assert_eq!(ds.head(2).nrow(), 2);
        assert_eq!(ds.head(2).column("age").unwrap().values(), &[Value::Int(30), Value::Int(41)]);
    }

    #[test]
    fn test_duplicate_and_length_checks() {
        let ds = sample();
        let dup = ds.clone().with_column(Column::int("age", &[None, None, None]));
        assert!(matches!(dup, Err(Error::DuplicateColumn(_))));

        let short = ds.with_column(Column::int("short", &[Some(1)]));
        assert!(matches!(short, Err(Error::DataLengthMismatch { expected: 3, actual: 1 })));
    }

    #[test]
    fn test_column_new_rejects_wrong_type() {
        let result = Column::new("n", DType::Int64, vec![Value::from("x")]);
        assert!(matches!(result, Err(Error::ColumnType { .. })));
        assert!(Column::new("n", DType::Float64, vec![Value::Int(1), Value::Null]).is_ok());
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let col = Column::text("c", &[Some("win"), Some("loss"), None, Some("win")]);
        let labels: Vec<String> = col.categories().iter().map(Category::label).collect();
        assert_eq!(labels, vec!["loss", "win"]);
    }
}
