//! Per-call options for turning a grid into keyed records.

use crate::error::{ConfigError, ConfigResult};
use crate::result::ParseResult;
use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header row used when none is given (1-based).
pub const DEFAULT_HEADER_ROW: usize = 1;

/// First body row used when none is given (1-based).
pub const DEFAULT_BODY_ROW: usize = 2;

/// Ordered mapping from header label to canonical field key.
///
/// Declaration order is preserved and decides the order of
/// [`ParseResult::fields`]. Labels and keys are both unique.
///
/// # Example
///
/// ```
/// use sheet2json_core::HeaderMapping;
///
/// let mapping = HeaderMapping::try_from_pairs([
///     ("상품ID", "productId"),
///     ("가격", "price"),
/// ])
/// .unwrap();
///
/// assert_eq!(mapping.key_for("가격"), Some("price"));
/// assert!(HeaderMapping::try_from_pairs([("a", "x"), ("b", "x")]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "IndexMap<String, String>")]
pub struct HeaderMapping {
    entries: IndexMap<String, String>,
}

impl HeaderMapping {
    /// Create an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from `(label, key)` pairs in declaration order.
    pub fn try_from_pairs<I, L, K>(pairs: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (L, K)>,
        L: Into<String>,
        K: Into<String>,
    {
        let mut mapping = Self::new();
        for (label, key) in pairs {
            mapping.insert(label, key)?;
        }
        Ok(mapping)
    }

    /// Append a `label -> key` entry.
    ///
    /// Fails if the label is already mapped or another label already
    /// targets the same key.
    pub fn insert(&mut self, label: impl Into<String>, key: impl Into<String>) -> ConfigResult<()> {
        let label = label.into();
        let key = key.into();

        if self.entries.contains_key(&label) {
            return Err(ConfigError::DuplicateLabel { label });
        }
        if let Some((first, _)) = self.entries.iter().find(|(_, existing)| **existing == key) {
            return Err(ConfigError::DuplicateKey {
                key,
                first: first.clone(),
                second: label,
            });
        }

        self.entries.insert(label, key);
        Ok(())
    }

    /// Canonical key for a header label
    #[must_use]
    pub fn key_for(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    /// Iterate `(label, key)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, k)| (l.as_str(), k.as_str()))
    }

    /// Number of mapped labels
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mapped labels that the header row of `result` did not contain,
    /// in declaration order.
    #[must_use]
    pub fn unresolved_labels(&self, result: &ParseResult) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|label| !result.origin_header_names.contains(*label))
            .map(String::as_str)
            .collect()
    }
}

impl TryFrom<IndexMap<String, String>> for HeaderMapping {
    type Error = ConfigError;

    fn try_from(entries: IndexMap<String, String>) -> ConfigResult<Self> {
        Self::try_from_pairs(entries)
    }
}

// Entries are inserted one by one so a label repeated in the source
// object is reported instead of collapsing to its last value.
impl<'de> Deserialize<'de> for HeaderMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = HeaderMapping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of header labels to field keys")
            }

            fn visit_map<A>(self, mut map: A) -> Result<HeaderMapping, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut mapping = HeaderMapping::new();
                while let Some((label, key)) = map.next_entry::<String, String>()? {
                    mapping.insert(label, key).map_err(de::Error::custom)?;
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

impl From<HeaderMapping> for IndexMap<String, String> {
    fn from(mapping: HeaderMapping) -> Self {
        mapping.entries
    }
}

/// Options controlling how a grid is normalized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// 1-based row holding the header labels (default: 1)
    pub header_start_row_number: Option<usize>,
    /// 1-based row where data rows begin (default: 2)
    pub body_start_row_number: Option<usize>,
    /// Header label to canonical key mapping
    pub header_name_to_key: HeaderMapping,
    /// Whether numeric-looking body cells become numbers (default: true)
    pub cast_number: bool,
    /// Sheet to read; container readers fall back to the first sheet
    pub sheet_name: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            header_start_row_number: None,
            body_start_row_number: None,
            header_name_to_key: HeaderMapping::new(),
            cast_number: true,
            sheet_name: None,
        }
    }
}

impl ParseOptions {
    /// Create options for a mapping with default rows and number casting
    #[must_use]
    pub fn new(header_name_to_key: HeaderMapping) -> Self {
        ParseOptions {
            header_name_to_key,
            ..Default::default()
        }
    }

    /// Set the 1-based header row
    #[must_use]
    pub fn with_header_row(mut self, row_number: usize) -> Self {
        self.header_start_row_number = Some(row_number);
        self
    }

    /// Set the 1-based first body row
    #[must_use]
    pub fn with_body_row(mut self, row_number: usize) -> Self {
        self.body_start_row_number = Some(row_number);
        self
    }

    /// Set whether to cast numeric strings
    #[must_use]
    pub fn with_cast_number(mut self, cast_number: bool) -> Self {
        self.cast_number = cast_number;
        self
    }

    /// Set the sheet to read
    #[must_use]
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    /// 0-based header row index, or `None` when row number 0 was given
    /// (no such row; the header is treated as empty).
    #[must_use]
    pub fn header_row_index(&self) -> Option<usize> {
        self.header_start_row_number
            .unwrap_or(DEFAULT_HEADER_ROW)
            .checked_sub(1)
    }

    /// 0-based index of the first body row. Row number 0 starts at the
    /// first grid row.
    #[must_use]
    pub fn body_row_index(&self) -> usize {
        self.body_start_row_number
            .unwrap_or(DEFAULT_BODY_ROW)
            .saturating_sub(1)
    }

    /// The sheet name, which must be present and non-blank
    pub fn require_sheet_name(&self) -> ConfigResult<&str> {
        match self.sheet_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(ConfigError::missing("sheet_name")),
        }
    }
}
