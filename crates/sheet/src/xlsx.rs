use crate::error::{Result, SheetError};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use sheet2json_core::{normalize, CellValue, Grid, ParseOptions, ParseResult};
use std::io::Cursor;
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::String(b.to_string()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => {
            // Excel stores dates as days since 1899-12-30
            CellValue::Number(dt.as_f64())
        }
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

/// Turn a worksheet range into a grid anchored at A1.
///
/// calamine starts a range at the first used cell, so leading blank rows
/// and columns are padded back in. Blank rows inside the range are kept.
fn range_to_grid(range: &Range<Data>) -> Grid {
    let Some((start_row, start_col)) = range.start() else {
        return Grid::new();
    };

    let mut grid: Grid = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Null; start_col as usize];
        cells.extend(row.iter().map(data_to_cell_value));
        grid.push(cells);
    }

    grid
}

/// List the sheet names of a workbook held in memory
///
/// # Errors
///
/// Returns error if the bytes are not a readable workbook.
pub fn xlsx_sheet_names(bytes: &[u8]) -> Result<Vec<String>> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    Ok(workbook.sheet_names())
}

/// Decode one sheet of a workbook held in memory into a grid
///
/// Reads the named sheet, or the first sheet when `sheet_name` is `None`.
/// Supports every container calamine detects (xlsx, xlsm, xlsb, xls, ods).
///
/// # Errors
///
/// Returns [`SheetError::SheetNotFound`] if the named sheet does not exist,
/// or a workbook error if the bytes cannot be decoded.
pub fn read_xlsx_grid(bytes: &[u8], sheet_name: Option<&str>) -> Result<Grid> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_names = workbook.sheet_names();

    let name = match sheet_name {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(SheetError::SheetNotFound {
                    name: name.to_string(),
                    available: sheet_names,
                });
            }
            name.to_string()
        }
        None => match sheet_names.first() {
            Some(first) => first.clone(),
            None => {
                tracing::debug!("workbook has no sheets");
                return Ok(Grid::new());
            }
        },
    };

    let range = workbook.worksheet_range(&name)?;
    let grid = range_to_grid(&range);
    tracing::debug!(sheet = %name, rows = grid.len(), "decoded worksheet");

    Ok(grid)
}

/// Parse a workbook held in memory into keyed records
///
/// Uses `options.sheet_name` to pick the sheet, falling back to the first.
/// Row numbers in `options` are sheet-absolute: row 1 is sheet row 1 even
/// when the used range starts lower down.
///
/// # Example
/// ```no_run
/// use sheet2json_core::{HeaderMapping, ParseOptions};
/// use sheet2json_sheet::parse_xlsx;
///
/// let bytes = std::fs::read("products.xlsx").unwrap();
/// let mapping = HeaderMapping::try_from_pairs([("상품ID", "productId")]).unwrap();
/// let result = parse_xlsx(&bytes, &ParseOptions::new(mapping)).unwrap();
/// println!("{}", result.to_json().unwrap());
/// ```
pub fn parse_xlsx(bytes: &[u8], options: &ParseOptions) -> Result<ParseResult> {
    let grid = read_xlsx_grid(bytes, options.sheet_name.as_deref())?;
    Ok(normalize(&grid, options))
}

/// Read a workbook file and parse it into keyed records
pub fn parse_xlsx_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_xlsx(&bytes, options)
}
