//! Normalized output shared by every source format.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One normalized body row, keyed by canonical field key in `fields` order.
pub type Record = IndexMap<String, FieldValue>;

/// A coerced body value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Try to get the value as a float
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// Try to get the value as text
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => Some(s),
        }
    }
}

// Integral numbers go out as JSON integers (`1001`, not `1001.0`).
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
                serializer.serialize_i64(*n as i64)
            }
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// Result of normalizing a grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Non-empty trimmed header labels in column order
    pub origin_header_names: Vec<String>,
    /// Resolved canonical keys in mapping declaration order
    pub fields: Vec<String>,
    /// Canonical key to the header label it came from
    pub header: IndexMap<String, String>,
    /// Non-blank body rows
    pub body: Vec<Record>,
}

impl ParseResult {
    /// Check if nothing was found at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origin_header_names.is_empty()
            && self.fields.is_empty()
            && self.header.is_empty()
            && self.body.is_empty()
    }

    /// Serialize to a compact JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_serializes_integers_without_fraction() {
        assert_eq!(serde_json::to_value(FieldValue::from(1001)).unwrap(), json!(1001));
        assert_eq!(serde_json::to_value(FieldValue::from(-3.5)).unwrap(), json!(-3.5));
        assert_eq!(serde_json::to_value(FieldValue::from("노트북")).unwrap(), json!("노트북"));
    }

    #[test]
    fn test_result_json_shape() {
        let mut record = Record::new();
        record.insert("productId".to_string(), FieldValue::from(1001));
        record.insert("productName".to_string(), FieldValue::from("노트북"));

        let mut header = IndexMap::new();
        header.insert("productId".to_string(), "상품ID".to_string());
        header.insert("productName".to_string(), "상품명칭".to_string());

        let result = ParseResult {
            origin_header_names: vec!["상품ID".to_string(), "상품명칭".to_string()],
            fields: vec!["productId".to_string(), "productName".to_string()],
            header,
            body: vec![record],
        };

        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "originHeaderNames": ["상품ID", "상품명칭"],
                "fields": ["productId", "productName"],
                "header": {"productId": "상품ID", "productName": "상품명칭"},
                "body": [{"productId": 1001, "productName": "노트북"}]
            })
        );
    }

    #[test]
    fn test_default_is_empty() {
        assert!(ParseResult::default().is_empty());
    }
}
