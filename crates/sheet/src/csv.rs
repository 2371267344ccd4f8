use crate::error::{Result, SheetError};
use encoding_rs::Encoding;
use sheet2json_core::{normalize, CellValue, Grid, ParseOptions, ParseResult};
use std::borrow::Cow;
use std::path::Path;

/// Encoding label used when none is given
pub const DEFAULT_ENCODING: &str = "utf-8";

/// CSV reader options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Text encoding label, e.g. "utf-8", "euc-kr", "utf-16le" (default: "utf-8")
    pub encoding: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl CsvOptions {
    /// Create options for TSV (tab-separated values)
    #[must_use]
    pub fn tsv() -> Self {
        CsvOptions {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the text encoding label
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

/// Decode raw bytes using an encoding label.
///
/// Labels follow the WHATWG Encoding Standard (`utf-8`, `euc-kr`, `windows-949`,
/// `shift_jis`, `utf-16le`, ...). A byte-order mark overrides the label and
/// is stripped. Malformed sequences become U+FFFD.
///
/// # Errors
///
/// Returns [`SheetError::UnsupportedEncoding`] for an unknown label.
pub fn decode_text<'a>(bytes: &'a [u8], label: &str) -> Result<Cow<'a, str>> {
    let encoding =
        Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| SheetError::UnsupportedEncoding {
            label: label.to_string(),
        })?;

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = used.name(), "replaced malformed byte sequences while decoding");
    }

    Ok(text)
}

/// Split text into lines ending at `\r\n`, `\n` or a lone `\r`.
///
/// A trailing terminator does not start an extra line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                let line = &rest[..end];
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Parse one line into cells. A blank line becomes a single empty cell.
///
/// `line` holds no line terminators, so it decodes to at most one record.
fn parse_line(builder: &csv::ReaderBuilder, line: &str) -> Result<Vec<CellValue>> {
    if line.is_empty() {
        return Ok(vec![CellValue::String(String::new())]);
    }

    let mut reader = builder.from_reader(line.as_bytes());
    let mut cells = Vec::new();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        cells.extend(record.iter().map(|field| CellValue::String(field.to_string())));
    }

    Ok(cells)
}

/// Decode delimited text into a grid, one row per line
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Blank lines stay in the grid
/// as rows with a single empty cell so 1-based row numbers line up with the
/// file. Fields may be double-quoted; a doubled quote inside a quoted field
/// is a literal quote. Every cell is a string; number casting happens in the
/// normalizer.
///
/// # Example
/// ```
/// use sheet2json_core::CellValue;
/// use sheet2json_sheet::{read_csv_grid, CsvOptions};
///
/// let grid = read_csv_grid(b"1001,\"a, b\"\n\n1002,c", &CsvOptions::default()).unwrap();
/// assert_eq!(grid.len(), 3);
/// assert_eq!(grid[0][1], CellValue::String("a, b".to_string()));
/// ```
pub fn read_csv_grid(bytes: &[u8], options: &CsvOptions) -> Result<Grid> {
    let text = decode_text(bytes, &options.encoding)?;

    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(options.delimiter)
        .quote(b'"')
        .double_quote(true)
        .has_headers(false)
        .flexible(true);

    let grid = split_lines(&text)
        .map(|line| {
            builder.buffer_capacity(line.len().max(1));
            parse_line(&builder, line)
        })
        .collect::<Result<Grid>>()?;

    tracing::debug!(rows = grid.len(), "decoded delimited text");
    Ok(grid)
}

/// Parse delimited text into keyed records
pub fn parse_csv(
    bytes: &[u8],
    csv_options: &CsvOptions,
    options: &ParseOptions,
) -> Result<ParseResult> {
    let grid = read_csv_grid(bytes, csv_options)?;
    Ok(normalize(&grid, options))
}

/// Read a CSV file and parse it into keyed records
pub fn parse_csv_file<P: AsRef<Path>>(
    path: P,
    csv_options: &CsvOptions,
    options: &ParseOptions,
) -> Result<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_csv(&bytes, csv_options, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(row: &[CellValue]) -> Vec<String> {
        row.iter().map(CellValue::to_text).collect()
    }

    #[test]
    fn test_quoted_field_with_delimiter() {
        let grid = read_csv_grid("1001,\"키보드, 무선\",55000".as_bytes(), &CsvOptions::default())
            .unwrap();
        assert_eq!(cells(&grid[0]), vec!["1001", "키보드, 무선", "55000"]);
    }

    #[test]
    fn test_doubled_quote_escape() {
        let grid = read_csv_grid(
            "1004,\"USB 허브 \"\"고급형\"\"\",27000".as_bytes(),
            &CsvOptions::default(),
        )
        .unwrap();
        assert_eq!(grid[0][1], CellValue::String("USB 허브 \"고급형\"".to_string()));
    }

    #[test]
    fn test_blank_lines_are_rows() {
        let grid = read_csv_grid(b"a,b\r\n\r\n1,2\n\n3,4\n", &CsvOptions::default()).unwrap();
        assert_eq!(grid.len(), 5);
        assert!(grid[1].iter().all(CellValue::is_blank));
        assert!(grid[3].iter().all(CellValue::is_blank));
        assert_eq!(cells(&grid[4]), vec!["3", "4"]);
    }

    #[test]
    fn test_bare_cr_line_endings() {
        let grid = read_csv_grid(b"a,b\r1,2\r3,4", &CsvOptions::default()).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(cells(&grid[1]), vec!["1", "2"]);
        assert_eq!(cells(&grid[2]), vec!["3", "4"]);
    }

    #[test]
    fn test_stray_cr_splits_line() {
        let grid = read_csv_grid(b"a,b\n1,2\r3,4\n5,6\n", &CsvOptions::default()).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(cells(&grid[2]), vec!["3", "4"]);
        assert_eq!(cells(&grid[3]), vec!["5", "6"]);
    }

    #[test]
    fn test_split_lines() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\n\r\nd\n").collect();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn test_line_longer_than_reader_buffer() {
        let long = "가".repeat(20_000);
        let text = format!("id,name\n1,\"{long}\"\n2,short");
        let grid = read_csv_grid(text.as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1][1], CellValue::String(long));
        assert_eq!(cells(&grid[2]), vec!["2", "short"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(read_csv_grid(b"", &CsvOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_ragged_rows() {
        let grid = read_csv_grid(b"a,b,c\n1\n1,2,3,4", &CsvOptions::default()).unwrap();
        assert_eq!(grid[1].len(), 1);
        assert_eq!(grid[2].len(), 4);
    }

    #[test]
    fn test_tsv() {
        let grid = read_csv_grid(b"name\tage\nAlice\t30", &CsvOptions::tsv()).unwrap();
        assert_eq!(cells(&grid[1]), vec!["Alice", "30"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let options = CsvOptions::default().with_delimiter(b';');
        let grid = read_csv_grid(b"a;\"b;c\"", &options).unwrap();
        assert_eq!(cells(&grid[0]), vec!["a", "b;c"]);
    }

    #[test]
    fn test_decode_euc_kr() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode("상품ID,가격\n1001,55000");
        let options = CsvOptions::default().with_encoding("euc-kr");
        let grid = read_csv_grid(&bytes, &options).unwrap();
        assert_eq!(cells(&grid[0]), vec!["상품ID", "가격"]);
    }

    #[test]
    fn test_decode_strips_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("상품ID,가격".as_bytes());
        let grid = read_csv_grid(&bytes, &CsvOptions::default()).unwrap();
        assert_eq!(grid[0][0], CellValue::String("상품ID".to_string()));
    }

    #[test]
    fn test_unknown_encoding() {
        let options = CsvOptions::default().with_encoding("klingon");
        let err = read_csv_grid(b"a", &options).unwrap_err();
        assert!(matches!(err, SheetError::UnsupportedEncoding { label } if label == "klingon"));
    }
}
