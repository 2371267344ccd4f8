use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular (possibly ragged) grid of raw cells, row-major and 0-based.
pub type Grid = Vec<Vec<CellValue>>;

/// Represents a raw cell value as produced by a format adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    String(String),
}

impl CellValue {
    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check if the value is empty after trimming whitespace
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Number(_) => false,
            CellValue::String(s) => s.trim().is_empty(),
        }
    }

    /// Try to get the value as a float
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::String(_) | CellValue::Null => None,
        }
    }

    /// Coerce the value to the text the normalizer works on.
    ///
    /// Integral numbers render without a fractional part, so a numeric
    /// header cell `1001.0` reads as `"1001"`.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Number(i as f64)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Number(f64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Number(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// Build a [`Grid`] from nested vectors of anything convertible to a cell.
#[must_use]
pub fn grid_from<T: Into<CellValue>>(rows: Vec<Vec<T>>) -> Grid {
    rows.into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}
