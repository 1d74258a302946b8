//! CSV encoding.

use std::io::Write;

use crate::error::ExportResult;
use crate::types::TabularDocument;

/// Write `document` as CSV: a header row, then one record per row. Missing cells are empty
/// fields and no row index is written.
pub fn write_csv<W: Write>(document: &TabularDocument, writer: W) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(document.schema.field_names())?;
    for row in &document.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}
