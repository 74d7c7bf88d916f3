//! Console overview of a dataset.
//!
//! Prints, in fixed order: dimensions, column types, the first rows, missing
//! counts, and descriptive statistics.

use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::stats::{display_width, pad_left, Describe};
use std::io::{self, Write};

/// Rows shown by [`data_overview`] when the caller has no preference.
pub const DEFAULT_HEAD_ROWS: usize = 5;

/// Print an overview of `dataset` to standard output.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `num_rows` is zero, or an I/O error if
/// stdout cannot be written.
pub fn data_overview(dataset: &Dataset, num_rows: usize) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_overview(dataset, num_rows, &mut out)
}

/// Write an overview of `dataset` to `out`.
///
/// If `num_rows` exceeds the row count every row is shown.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `num_rows` is zero (nothing is written),
/// or an I/O error from `out`.
pub fn write_overview<W: Write>(dataset: &Dataset, num_rows: usize, out: &mut W) -> Result<()> {
    if num_rows == 0 {
        return Err(Error::InvalidArgument("num_rows must be a positive integer".to_string()));
    }
    tracing::debug!(rows = dataset.nrow(), cols = dataset.ncol(), num_rows, "writing overview");

    let (rows, cols) = dataset.shape();
    writeln!(out, "データフレームのサイズ: ({rows}, {cols})")?;

    writeln!(out, "\n各列のデータ型:")?;
    write_series(out, dataset.dtypes().into_iter().map(|(name, t)| (name, t.to_string())))?;

    writeln!(out, "\n最初の{num_rows}行:")?;
    write_rows(out, &dataset.head(num_rows))?;

    writeln!(out, "\n欠損値の数:")?;
    write_series(out, dataset.null_counts().into_iter().map(|(name, n)| (name, n.to_string())))?;

    writeln!(out, "\n基本的な統計情報:")?;
    if dataset.ncol() == 0 {
        writeln!(out, "Empty dataset")?;
    } else {
        write!(out, "{}", Describe::from_dataset(dataset))?;
    }

    out.flush()?;
    Ok(())
}

/// One `name  value` line per column, names left-aligned.
fn write_series<'a, W: Write>(
    out: &mut W,
    entries: impl Iterator<Item = (&'a str, String)>,
) -> io::Result<()> {
    let entries: Vec<(&str, String)> = entries.collect();
    let name_width = entries.iter().map(|(n, _)| display_width(n)).max().unwrap_or(0);
    let value_width = entries.iter().map(|(_, v)| display_width(v)).max().unwrap_or(0);
    for (name, value) in &entries {
        let pad = name_width - display_width(name);
        writeln!(out, "{name}{}    {}", " ".repeat(pad), pad_left(value, value_width))?;
    }
    Ok(())
}

/// Full-width table of rows, each prefixed by its index.
fn write_rows<W: Write>(out: &mut W, head: &Dataset) -> io::Result<()> {
    let index_width = head.nrow().saturating_sub(1).to_string().len();
    let cells: Vec<Vec<String>> = head
        .iter()
        .map(|c| c.values().iter().map(ToString::to_string).collect())
        .collect();
    let widths: Vec<usize> = head
        .iter()
        .zip(&cells)
        .map(|(c, vals)| {
            vals.iter().map(|v| display_width(v)).chain([display_width(c.name())]).max().unwrap_or(0)
        })
        .collect();

    write!(out, "{:index_width$}", "")?;
    for (c, w) in head.iter().zip(&widths) {
        write!(out, "  {}", pad_left(c.name(), *w))?;
    }
    writeln!(out)?;

    for row in 0..head.nrow() {
        write!(out, "{row:<index_width$}")?;
        for (col, w) in cells.iter().zip(&widths) {
            write!(out, "  {}", pad_left(&col[row], *w))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;

    fn render(ds: &Dataset, n: usize) -> String {
        let mut buf = Vec::new();
        write_overview(ds, n, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn section<'a>(text: &'a str, heading: &str) -> Vec<&'a str> {
        text.split("\n\n")
            .find(|s| s.starts_with(heading))
            .map(|s| s.lines().skip(1).collect())
            .unwrap_or_default()
    }

    fn three_rows() -> Dataset {
        Dataset::from_columns([
            Column::text("region", &[Some("A"), None, Some("B")]),
            Column::float("score", &[Some(1.5), Some(2.0), None]),
            Column::int("age", &[Some(30), Some(41), Some(22)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_sections_in_order() {
        let text = render(&three_rows(), 5);
        let headings = ["データフレームのサイズ", "各列のデータ型", "最初の5行", "欠損値の数", "基本的な統計情報"];
        let positions: Vec<usize> = headings.iter().map(|h| text.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.starts_with("データフレームのサイズ: (3, 3)"));
    }

    #[test]
    fn test_head_rows_clamped() {
        let text = render(&three_rows(), 5);
        // header line plus min(5, 3) rows
        assert_eq!(section(&text, "最初の5行").len(), 4);

        let text = render(&three_rows(), 2);
        assert_eq!(section(&text, "最初の2行").len(), 3);
    }

    #[test]
    fn test_dtypes_listed_in_column_order() {
        let text = render(&three_rows(), 5);
        let lines = section(&text, "各列のデータ型");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("region") && lines[0].ends_with("object"));
        assert!(lines[1].starts_with("score") && lines[1].ends_with("float64"));
        assert!(lines[2].starts_with("age") && lines[2].ends_with("int64"));
    }

    #[test]
    fn test_null_counts() {
        let text = render(&three_rows(), 5);
        let lines = section(&text, "欠損値の数");
        let counts: Vec<&str> = lines.iter().map(|l| l.split_whitespace().last().unwrap()).collect();
        assert_eq!(counts, vec!["1", "1", "0"]);
    }

    #[test]
    fn test_missing_values_print_nan() {
        let text = render(&three_rows(), 5);
        let rows = section(&text, "最初の5行");
        assert!(rows[2].contains("NaN"));
    }

    #[test]
    fn test_series_aligns_wide_values() {
        let mut buf = Vec::new();
        let entries = [("性別", "男性".to_string()), ("id", "x".to_string())];
        write_series(&mut buf, entries.into_iter()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let widths: Vec<usize> = text.lines().map(display_width).collect();
        assert_eq!(widths[0], widths[1], "{text}");
        assert!(text.lines().nth(1).unwrap().ends_with("   x"));
    }

    #[test]
    fn test_zero_rows_rejected() {
        let mut buf = Vec::new();
        let err = write_overview(&three_rows(), 0, &mut buf).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::from_columns([Column::int("n", &[]), Column::text("t", &[])]).unwrap();
        let text = render(&ds, 5);
        assert!(text.starts_with("データフレームのサイズ: (0, 2)"));
        assert_eq!(section(&text, "各列のデータ型").len(), 2);
        // header only
        assert_eq!(section(&text, "最初の5行").len(), 1);
        assert!(text.contains("count"));
    }

    #[test]
    fn test_no_columns() {
        let text = render(&Dataset::new(), DEFAULT_HEAD_ROWS);
        assert!(text.starts_with("データフレームのサイズ: (0, 0)"));
        assert!(text.contains("Empty dataset"));
    }
}
