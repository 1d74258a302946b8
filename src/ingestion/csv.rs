//! CSV ingestion implementation.

use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::TabularDocument;

use super::infer::{RawCell, build_document, normalize_headers};

/// Ingest a CSV file into an in-memory [`TabularDocument`].
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<TabularDocument> {
    let mut rdr = reader_builder().from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV bytes (e.g. an uploaded file held in memory).
pub fn ingest_csv_from_bytes(bytes: &[u8]) -> IngestionResult<TabularDocument> {
    let mut rdr = reader_builder().from_reader(bytes);
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
///
/// Rules:
///
/// - The first record is the header; it names the columns.
/// - Records shorter than the header are padded with missing cells.
/// - Records longer than the header are rejected.
/// - Column types are inferred from content once all records are read.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> IngestionResult<TabularDocument> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestionError::EmptyInput {
            message: "csv has no header row".to_string(),
        });
    }
    let width = headers.len();

    let mut columns: Vec<Vec<RawCell>> = vec![Vec::new(); width];
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        if record.len() > width {
            return Err(IngestionError::RaggedRow {
                row: user_row,
                expected: width,
                found: record.len(),
            });
        }

        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(RawCell::from_text(record.get(idx).unwrap_or("")));
        }
    }

    let headers = normalize_headers(headers.iter().map(str::to_owned).collect());
    Ok(build_document(headers, columns))
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}
