//! Spreadsheet (`.xlsx`) ingestion implementation.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::{IngestionError, IngestionResult};
use crate::types::TabularDocument;

use super::infer::{RawCell, build_document, is_missing_token, normalize_headers, parse_datetime};

/// Ingest an `.xlsx` workbook from disk.
///
/// See [`ingest_excel_from_bytes`] for the sheet and header rules.
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
) -> IngestionResult<TabularDocument> {
    let bytes = std::fs::read(path)?;
    ingest_excel_from_bytes(&bytes, sheet_name)
}

/// Ingest an `.xlsx` workbook held in memory.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Keeps native cell kinds (numbers, booleans, datetimes) for type inference
pub fn ingest_excel_from_bytes(
    bytes: &[u8],
    sheet_name: Option<&str>,
) -> IngestionResult<TabularDocument> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestionError::EmptyInput {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    ingest_sheet_range(&sheet, &range)
}

fn ingest_sheet_range(sheet: &str, range: &Range<Data>) -> IngestionResult<TabularDocument> {
    let (header_row_idx, header_cells) = find_header_row(range).ok_or_else(|| {
        IngestionError::EmptyInput {
            message: format!("sheet '{sheet}' has no non-empty rows (no header row found)"),
        }
    })?;
    let width = header_cells.len();

    let mut columns: Vec<Vec<RawCell>> = vec![Vec::new(); width];
    for row in range.rows().skip(header_row_idx + 1) {
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(convert_cell(row.get(idx).unwrap_or(&Data::Empty)));
        }
    }

    // Trailing formatted-but-blank rows show up in the used range; drop them.
    let keep = (0..columns.first().map_or(0, Vec::len))
        .rev()
        .find(|&r| columns.iter().any(|c| c[r] != RawCell::Empty))
        .map_or(0, |last| last + 1);
    for column in &mut columns {
        column.truncate(keep);
    }

    Ok(build_document(normalize_headers(header_cells), columns))
}

fn find_header_row(range: &Range<Data>) -> Option<(usize, Vec<String>)> {
    range.rows().enumerate().find_map(|(idx0, row)| {
        let non_empty = row.iter().any(|c| !matches!(c, Data::Empty));
        non_empty.then(|| (idx0, row.iter().map(cell_to_header_string).collect()))
    })
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn convert_cell(c: &Data) -> RawCell {
    match c {
        Data::Empty => RawCell::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if is_missing_token(trimmed) {
                RawCell::Empty
            } else {
                RawCell::Text(trimmed.to_owned())
            }
        }
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) => RawCell::Float(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(RawCell::DateTime)
            .unwrap_or_else(|| RawCell::Float(dt.as_f64())),
        Data::DateTimeIso(s) => parse_datetime(s)
            .map(RawCell::DateTime)
            .unwrap_or_else(|| RawCell::Text(s.clone())),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(e) => RawCell::Text(e.to_string()),
    }
}

/// Convert an Excel serial date (days since 1899-12-30, 1900 date system) to a date-time,
/// rounded to whole milliseconds.
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round();
    if !millis.is_finite() {
        return None;
    }
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::excel_serial_to_datetime;

    #[test]
    fn serial_dates_use_the_1900_system() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0);
        assert_eq!(excel_serial_to_datetime(45292.0), expected);

        let noon = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(12, 0, 0);
        assert_eq!(excel_serial_to_datetime(45292.5), noon);

        let half_second = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 500);
        assert_eq!(excel_serial_to_datetime(45292.0 + 36_000.5 / 86_400.0), half_second);
    }
}
