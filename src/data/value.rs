//! Cell values and their natural ordering.

use std::cmp::Ordering;
use std::fmt;

/// Declared type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    /// 64-bit signed integers.
    Int64,
    /// 64-bit floats.
    Float64,
    /// Booleans.
    Bool,
    /// Free text / categorical labels.
    Object,
}

impl DType {
    /// Whether descriptive statistics treat this type as numeric.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }

    /// Whether a value may be stored in a column of this type.
    #[must_use]
    pub fn admits(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null)
            | (Self::Int64, Value::Int(_))
            | (Self::Float64, Value::Float(_) | Value::Int(_))
            | (Self::Bool, Value::Bool(_))
            | (Self::Object, _) => true,
            _ => false,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Object => "object",
        };
        f.pad(name)
    }
}

/// A single cell in a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer.
    Int(i64),
    /// A float. `NaN` counts as missing.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// A text label.
    Text(String),
    /// A missing entry.
    Null,
}

impl Value {
    /// True for `Null` and for `Float(NaN)`.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value, `None` for non-numeric or missing entries.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Text view of the value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Rank of the value's kind in the natural ordering.
    fn kind_rank(&self) -> u8 {
        if self.is_missing() {
            return 3;
        }
        match self {
            Self::Int(_) | Self::Float(_) => 0,
            Self::Bool(_) => 1,
            Self::Text(_) => 2,
            Self::Null => 3,
        }
    }

    /// Natural ordering: numbers < booleans < text < missing.
    ///
    /// Integers and floats compare numerically, so `Int(1)` and `Float(1.0)`
    /// are equal.
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self.kind_rank(), other.kind_rank()) {
            (0, 0) => {
                let a = self.as_f64().unwrap_or(f64::NAN);
                let b = other.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
            (1, 1) => match (self, other) {
                (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
                _ => Ordering::Equal,
            },
            (2, 2) => match (self, other) {
                (Self::Text(a), Self::Text(b)) => a.cmp(b),
                _ => Ordering::Equal,
            },
            (a, b) => a.cmp(&b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => f.pad(&v.to_string()),
            Self::Float(v) if v.is_nan() => f.pad("NaN"),
            Self::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => f.pad(&format!("{v:.1}")),
            Self::Float(v) => f.pad(&v.to_string()),
            Self::Bool(true) => f.pad("True"),
            Self::Bool(false) => f.pad("False"),
            Self::Text(s) => f.pad(s),
            Self::Null => f.pad("NaN"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A non-missing value used as a category key.
///
/// Ordered and compared with [`Value::natural_cmp`], so it can key sorted maps.
#[derive(Debug, Clone)]
pub struct Category(Value);

impl Category {
    /// Wrap a value, `None` if it is missing.
    #[must_use]
    pub fn new(value: &Value) -> Option<Self> {
        (!value.is_missing()).then(|| Self(value.clone()))
    }

    /// The wrapped value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.to_string()
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Category {}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.natural_cmp(&other.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
