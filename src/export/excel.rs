//! Spreadsheet (`.xlsx`) encoding.

use std::io::{Seek, Write};

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};

use crate::error::{ExportError, ExportResult};
use crate::types::{TabularDocument, Value, is_midnight};

/// Name of the single worksheet written on export.
pub const SHEET_NAME: &str = "Sheet1";

/// Largest row count a worksheet holds, header included.
pub const MAX_SHEET_ROWS: usize = 1_048_576;

/// Largest column count a worksheet holds.
pub const MAX_SHEET_COLUMNS: usize = 16_384;

/// Write `document` as a single-sheet workbook.
///
/// Numbers, booleans and strings keep their native cell kinds; dates get a date number format so
/// they read back as dates. Missing cells are left blank.
pub fn write_xlsx<W: Write + Seek + Send>(document: &TabularDocument, writer: W) -> ExportResult<()> {
    if document.row_count() + 1 > MAX_SHEET_ROWS || document.column_count() > MAX_SHEET_COLUMNS {
        return Err(ExportError::SheetLimit {
            rows: document.row_count(),
            columns: document.column_count(),
        });
    }

    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in document.schema.field_names().enumerate() {
        sheet.write_string(0, col as ColNum, name)?;
    }

    for (idx, row) in document.rows.iter().enumerate() {
        let r = (idx + 1) as RowNum;
        for (col, value) in row.iter().enumerate() {
            let c = col as ColNum;
            match value {
                Value::Null => {}
                Value::Int64(v) => {
                    sheet.write_number(r, c, *v as f64)?;
                }
                Value::Float64(v) => {
                    sheet.write_number(r, c, *v)?;
                }
                Value::Bool(v) => {
                    sheet.write_boolean(r, c, *v)?;
                }
                Value::Utf8(s) => {
                    sheet.write_string(r, c, s)?;
                }
                Value::DateTime(dt) => {
                    let format = if is_midnight(dt) {
                        &date_format
                    } else {
                        &datetime_format
                    };
                    sheet.write_datetime_with_format(r, c, dt, format)?;
                }
            }
        }
    }

    workbook.save_to_writer(writer)?;
    Ok(())
}
