//! # sheet2json-core
//!
//! Turns a 2-D grid of raw spreadsheet cells into keyed records using a
//! caller-supplied mapping from header labels to canonical field keys.
//!
//! Every format adapter (xlsx, CSV, Google Sheets) produces a [`Grid`] and
//! hands it to [`normalize`], so header resolution, field ordering, number
//! casting and blank-row elision behave the same for every source.
//!
//! # Example
//!
//! ```
//! use sheet2json_core::{grid_from, normalize, FieldValue, HeaderMapping, ParseOptions};
//!
//! let grid = grid_from(vec![
//!     vec!["상품ID", "상품명칭", "가격"],
//!     vec!["1001", "노트북", "1500000"],
//!     vec!["", "", ""],
//! ]);
//!
//! let mapping = HeaderMapping::try_from_pairs([
//!     ("상품ID", "productId"),
//!     ("상품명칭", "productName"),
//!     ("가격", "price"),
//! ])
//! .unwrap();
//!
//! let result = normalize(&grid, &ParseOptions::new(mapping));
//!
//! assert_eq!(result.fields, vec!["productId", "productName", "price"]);
//! assert_eq!(result.body.len(), 1);
//! assert_eq!(result.body[0]["price"], FieldValue::Number(1_500_000.0));
//! ```

mod cell;
mod error;
mod normalize;
mod numeric;
mod options;
mod result;

/// Re-export cell and grid types.
pub use cell::{grid_from, CellValue, Grid};
/// Re-export configuration errors.
pub use error::{ConfigError, ConfigResult};
/// Re-export the normalizer.
pub use normalize::normalize;
/// Re-export numeric-literal parsing.
pub use numeric::parse_numeric_literal;
/// Re-export options.
pub use options::{HeaderMapping, ParseOptions, DEFAULT_BODY_ROW, DEFAULT_HEADER_ROW};
/// Re-export result types.
pub use result::{FieldValue, ParseResult, Record};
