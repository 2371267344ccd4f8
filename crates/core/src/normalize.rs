//! Grid to keyed-record normalization.
//!
//! Every source format funnels into [`normalize`]: the header row is
//! resolved against the caller's [`HeaderMapping`](crate::HeaderMapping),
//! body rows become [`Record`]s, and rows that are blank across every
//! mapped column are dropped.

use crate::cell::CellValue;
use crate::numeric::parse_numeric_literal;
use crate::options::ParseOptions;
use crate::result::{FieldValue, ParseResult, Record};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Normalize a grid of raw cells into canonical records.
///
/// Never fails: an empty grid, an out-of-range header row, or a body start
/// past the end of the grid all produce empty structures.
///
/// # Example
///
/// ```
/// use sheet2json_core::{normalize, CellValue, FieldValue, HeaderMapping, ParseOptions};
///
/// let grid = vec![
///     vec![CellValue::from("이름"), CellValue::from("나이")],
///     vec![CellValue::from("Alice"), CellValue::from("30")],
///     vec![CellValue::Null, CellValue::from("  ")],
/// ];
/// let mapping = HeaderMapping::try_from_pairs([("나이", "age"), ("이름", "name")]).unwrap();
/// let result = normalize(&grid, &ParseOptions::new(mapping));
///
/// assert_eq!(result.fields, vec!["age", "name"]);
/// assert_eq!(result.body.len(), 1);
/// assert_eq!(result.body[0]["age"], FieldValue::Number(30.0));
/// ```
pub fn normalize(grid: &[Vec<CellValue>], options: &ParseOptions) -> ParseResult {
    if grid.is_empty() {
        return ParseResult::default();
    }

    let header_row: &[CellValue] = options
        .header_row_index()
        .and_then(|index| grid.get(index))
        .map(Vec::as_slice)
        .unwrap_or_default();

    let raw_headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_text().trim().to_string())
        .collect();

    let origin_header_names: Vec<String> = raw_headers
        .iter()
        .filter(|name| !name.is_empty())
        .cloned()
        .collect();

    // First occurrence wins; later duplicate labels are unreachable.
    let mut column_index: HashMap<&str, usize> = HashMap::new();
    for (index, name) in raw_headers.iter().enumerate() {
        if !name.is_empty() {
            column_index.entry(name.as_str()).or_insert(index);
        }
    }

    let mut fields: Vec<String> = Vec::new();
    let mut header: IndexMap<String, String> = IndexMap::new();
    for (label, key) in options.header_name_to_key.iter() {
        if origin_header_names.iter().any(|name| name == label) {
            fields.push(key.to_string());
            header.insert(key.to_string(), label.to_string());
        }
    }

    let columns: Vec<(&str, Option<usize>)> = fields
        .iter()
        .map(|key| {
            let column = header
                .get(key)
                .and_then(|label| column_index.get(label.as_str()).copied());
            (key.as_str(), column)
        })
        .collect();

    let body: Vec<Record> = grid
        .iter()
        .skip(options.body_row_index())
        .filter_map(|row| build_record(row, &columns, options.cast_number))
        .collect();

    tracing::debug!(
        rows = grid.len(),
        fields = fields.len(),
        records = body.len(),
        "normalized grid"
    );

    ParseResult {
        origin_header_names,
        fields,
        header,
        body,
    }
}

/// Build one record, or `None` if every mapped cell is blank.
fn build_record(
    row: &[CellValue],
    columns: &[(&str, Option<usize>)],
    cast_number: bool,
) -> Option<Record> {
    let mut record = Record::with_capacity(columns.len());
    let mut is_empty_row = true;

    for &(key, column) in columns {
        let Some(column) = column else {
            continue;
        };

        let text = row.get(column).map(CellValue::to_text).unwrap_or_default();
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            is_empty_row = false;
        }

        record.insert(key.to_string(), coerce(trimmed, cast_number));
    }

    if is_empty_row {
        None
    } else {
        Some(record)
    }
}

fn coerce(trimmed: &str, cast_number: bool) -> FieldValue {
    if cast_number {
        if let Some(n) = parse_numeric_literal(trimmed) {
            return FieldValue::Number(n);
        }
    }
    FieldValue::Text(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::grid_from;
    use crate::options::HeaderMapping;

    fn mapping(pairs: &[(&str, &str)]) -> HeaderMapping {
        HeaderMapping::try_from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_empty_grid() {
        let options = ParseOptions::new(mapping(&[("a", "x")]));
        let result = normalize(&[], &options);
        assert!(result.is_empty());
    }

    #[test]
    fn test_header_out_of_range() {
        let grid = grid_from(vec![vec!["a"], vec!["1"]]);
        let options = ParseOptions::new(mapping(&[("a", "x")])).with_header_row(10);
        let result = normalize(&grid, &options);

        assert!(result.origin_header_names.is_empty());
        assert!(result.fields.is_empty());
        assert!(result.header.is_empty());
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_header_row_zero_is_empty_header() {
        let grid = grid_from(vec![vec!["a"], vec!["1"]]);
        let options = ParseOptions::new(mapping(&[("a", "x")])).with_header_row(0);
        let result = normalize(&grid, &options);
        assert!(result.fields.is_empty());
    }

    #[test]
    fn test_body_past_end() {
        let grid = grid_from(vec![vec!["a"], vec!["1"]]);
        let options = ParseOptions::new(mapping(&[("a", "x")])).with_body_row(5);
        let result = normalize(&grid, &options);

        assert_eq!(result.fields, vec!["x"]);
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_headers_are_trimmed_and_blanks_skipped() {
        let grid = vec![vec![
            CellValue::from("  이름 "),
            CellValue::Null,
            CellValue::from("   "),
            CellValue::Number(2024.0),
        ]];
        let options = ParseOptions::new(mapping(&[("2024", "year")]));
        let result = normalize(&grid, &options);

        assert_eq!(result.origin_header_names, vec!["이름", "2024"]);
        assert_eq!(result.fields, vec!["year"]);
    }

    #[test]
    fn test_fields_follow_mapping_order() {
        let grid = grid_from(vec![vec!["c", "a", "b"], vec!["3", "1", "2"]]);
        let options = ParseOptions::new(mapping(&[("a", "first"), ("b", "second"), ("c", "third")]));
        let result = normalize(&grid, &options);

        assert_eq!(result.origin_header_names, vec!["c", "a", "b"]);
        assert_eq!(result.fields, vec!["first", "second", "third"]);
        let keys: Vec<&String> = result.body[0].keys().collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
        assert_eq!(result.body[0]["third"], FieldValue::Number(3.0));
    }

    #[test]
    fn test_missing_labels_are_silent() {
        let grid = grid_from(vec![vec!["a"], vec!["1"]]);
        let options = ParseOptions::new(mapping(&[("missing", "m"), ("a", "x")]));
        let result = normalize(&grid, &options);

        assert_eq!(result.fields, vec!["x"]);
        assert_eq!(result.header.get("x").map(String::as_str), Some("a"));
        assert!(!result.header.contains_key("m"));
        assert_eq!(options.header_name_to_key.unresolved_labels(&result), vec!["missing"]);
    }

    #[test]
    fn test_duplicate_header_label_uses_first_column() {
        let grid = grid_from(vec![vec!["a", "a"], vec!["first", "second"]]);
        let options = ParseOptions::new(mapping(&[("a", "x")]));
        let result = normalize(&grid, &options);

        assert_eq!(result.origin_header_names, vec!["a", "a"]);
        assert_eq!(result.fields, vec!["x"]);
        assert_eq!(result.body[0]["x"], FieldValue::from("first"));
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let grid = grid_from(vec![
            vec!["a", "b", "unmapped"],
            vec!["", "  ", "has data"],
            vec!["1", "", ""],
            vec![],
        ]);
        let options = ParseOptions::new(mapping(&[("a", "x"), ("b", "y")]));
        let result = normalize(&grid, &options);

        assert_eq!(result.body.len(), 1);
        assert_eq!(result.body[0]["x"], FieldValue::Number(1.0));
        assert_eq!(result.body[0]["y"], FieldValue::from(""));
    }

    #[test]
    fn test_ragged_rows_read_as_blank() {
        let grid = grid_from(vec![vec!["a", "b"], vec!["only a"]]);
        let options = ParseOptions::new(mapping(&[("a", "x"), ("b", "y")]));
        let result = normalize(&grid, &options);

        assert_eq!(result.body.len(), 1);
        assert_eq!(result.body[0]["x"], FieldValue::from("only a"));
        assert_eq!(result.body[0]["y"], FieldValue::from(""));
    }

    #[test]
    fn test_cast_number_toggle() {
        let grid = grid_from(vec![vec!["n", "s"], vec![" 42 ", "상품, 무선"]]);

        let cast = normalize(&grid, &ParseOptions::new(mapping(&[("n", "n"), ("s", "s")])));
        assert_eq!(cast.body[0]["n"], FieldValue::Number(42.0));
        assert_eq!(cast.body[0]["s"], FieldValue::from("상품, 무선"));

        let raw = normalize(
            &grid,
            &ParseOptions::new(mapping(&[("n", "n"), ("s", "s")])).with_cast_number(false),
        );
        assert_eq!(raw.body[0]["n"], FieldValue::from("42"));
    }

    #[test]
    fn test_numeric_cells_without_cast_become_text() {
        let grid = vec![
            vec![CellValue::from("price")],
            vec![CellValue::Number(1_500_000.0)],
        ];
        let options = ParseOptions::new(mapping(&[("price", "price")])).with_cast_number(false);
        let result = normalize(&grid, &options);
        assert_eq!(result.body[0]["price"], FieldValue::from("1500000"));
    }

    #[test]
    fn test_header_and_body_may_overlap() {
        let grid = grid_from(vec![vec!["a"], vec!["1"]]);
        let options = ParseOptions::new(mapping(&[("a", "x")])).with_body_row(1);
        let result = normalize(&grid, &options);

        assert_eq!(result.body.len(), 2);
        assert_eq!(result.body[0]["x"], FieldValue::from("a"));
    }
}
