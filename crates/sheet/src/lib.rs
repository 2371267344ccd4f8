//! Spreadsheet and CSV readers for sheet2json
//!
//! Each reader decodes its source into a [`Grid`](sheet2json_core::Grid) and
//! hands it to [`normalize`](sheet2json_core::normalize), so both formats
//! produce the same [`ParseResult`](sheet2json_core::ParseResult).
//!
//! # Examples
//!
//! ## Parsing CSV
//!
//! ```
//! use sheet2json_core::{FieldValue, HeaderMapping, ParseOptions};
//! use sheet2json_sheet::{parse_csv, CsvOptions};
//!
//! let csv = "상품ID,상품명칭,가격\n1001,\"키보드, 무선\",55000\n";
//! let mapping = HeaderMapping::try_from_pairs([
//!     ("상품ID", "productId"),
//!     ("상품명칭", "productName"),
//!     ("가격", "price"),
//! ])
//! .unwrap();
//!
//! let result = parse_csv(csv.as_bytes(), &CsvOptions::default(), &ParseOptions::new(mapping)).unwrap();
//!
//! assert_eq!(result.body[0]["productName"], FieldValue::from("키보드, 무선"));
//! assert_eq!(result.body[0]["price"], FieldValue::from(55000));
//! ```
//!
//! ## Parsing a workbook
//!
//! ```no_run
//! use sheet2json_core::{HeaderMapping, ParseOptions};
//! use sheet2json_sheet::parse_xlsx_file;
//!
//! let mapping = HeaderMapping::try_from_pairs([("상품ID", "productId")]).unwrap();
//! let options = ParseOptions::new(mapping).with_sheet_name("재고");
//! let result = parse_xlsx_file("inventory.xlsx", &options).unwrap();
//! ```

mod csv;
mod error;
mod xlsx;

/// Re-export CSV reader and options.
pub use csv::{decode_text, parse_csv, parse_csv_file, read_csv_grid, CsvOptions, DEFAULT_ENCODING};
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export workbook reader.
pub use xlsx::{parse_xlsx, parse_xlsx_file, read_xlsx_grid, xlsx_sheet_names};
