//! CSV loading with per-column type inference.

use super::frame::{Column, Dataset};
use super::value::{DType, Value};
use crate::error::Result;
use std::io::Read;
use std::path::Path;

/// Cell contents read as missing.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Narrowest type that holds every non-missing cell: int64, float64, bool, object.
fn infer_dtype(cells: &[&str]) -> DType {
    let present: Vec<&str> = cells.iter().copied().filter(|c| !is_missing(c)).map(str::trim).collect();
    if present.is_empty() {
        return DType::Float64;
    }
    if present.iter().all(|c| c.parse::<i64>().is_ok()) {
        DType::Int64
    } else if present.iter().all(|c| c.parse::<f64>().is_ok()) {
        DType::Float64
    } else if present.iter().all(|c| parse_bool(c).is_some()) {
        DType::Bool
    } else {
        DType::Object
    }
}

fn parse_cell(cell: &str, dtype: DType) -> Value {
    if is_missing(cell) {
        return Value::Null;
    }
    let trimmed = cell.trim();
    match dtype {
        DType::Int64 => trimmed.parse().map_or(Value::Null, Value::Int),
        DType::Float64 => trimmed.parse().map_or(Value::Null, Value::Float),
        DType::Bool => parse_bool(trimmed).map_or(Value::Null, Value::Bool),
        DType::Object => Value::Text(cell.to_string()),
    }
}

impl Dataset {
    /// Read a dataset from CSV with a header row.
    ///
    /// Each column's type is inferred from its non-missing cells. A column with
    /// no present cells becomes `float64` of all-missing values.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed CSV or I/O failure.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for record in rdr.records() {
            records.push(record?);
        }

        let mut ds = Dataset::new();
        for (idx, name) in headers.iter().enumerate() {
            let cells: Vec<&str> = records.iter().map(|r| r.get(idx).unwrap_or("")).collect();
            let dtype = infer_dtype(&cells);
            let values = cells.iter().map(|c| parse_cell(c, dtype)).collect();
            ds.push_column(Column::new(name, dtype, values)?)?;
        }

        tracing::debug!(rows = ds.nrow(), cols = ds.ncol(), "loaded CSV dataset");
        Ok(ds)
    }

    /// Read a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
name,age,fare,survived,embarked
Braund,22,7.25,false,S
Cumings,38,71.2833,true,C
Heikkinen,,7.925,true,
Futrelle,35,53.1,TRUE,S
";

    #[test]
    fn test_infers_column_types() {
        let ds = Dataset::from_csv_reader(CSV.as_bytes()).unwrap();
        let dtypes: Vec<DType> = ds.dtypes().into_iter().map(|(_, t)| t).collect();
        assert_eq!(
            dtypes,
            vec![DType::Object, DType::Int64, DType::Float64, DType::Bool, DType::Object]
        );
        assert_eq!(ds.shape(), (4, 5));
    }

    #[test]
    fn test_missing_cells() {
        let ds = Dataset::from_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(ds.column("age").unwrap().null_count(), 1);
        assert_eq!(ds.column("embarked").unwrap().null_count(), 1);
        assert_eq!(ds.column("survived").unwrap().get(3), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_all_missing_column_is_float() {
        let ds = Dataset::from_csv_reader("a,b\n1,\n2,NA\n".as_bytes()).unwrap();
        assert_eq!(ds.column("b").unwrap().dtype(), DType::Float64);
        assert_eq!(ds.column("b").unwrap().null_count(), 2);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let ds = Dataset::from_csv_path(file.path()).unwrap();
        assert_eq!(ds.nrow(), 4);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Dataset::from_csv_path("/nonexistent/data.csv").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
