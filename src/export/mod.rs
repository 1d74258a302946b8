//! Re-encoding of documents into downloadable in-memory buffers.
//!
//! [`export`] is the entrypoint: it encodes a [`TabularDocument`] as CSV or XLSX into an
//! in-memory buffer, rewinds the buffer, and pairs it with a suggested file name and MIME type.
//! Nothing is written to disk; delivering the bytes is the caller's job.
//!
//! ```rust
//! use std::io::Read;
//!
//! use data_sweeper::export::export;
//! use data_sweeper::types::{Field, Schema, SemanticType, TabularDocument, TabularFormat, Value};
//!
//! # fn main() -> Result<(), data_sweeper::ExportError> {
//! let doc = TabularDocument::new(
//!     Schema::new(vec![
//!         Field::new("a", SemanticType::Numeric),
//!         Field::new("b", SemanticType::Text),
//!     ]),
//!     vec![vec![Value::Int64(1), Value::Null]],
//! );
//! let mut file = export(&doc, TabularFormat::Csv, "report.XLSX")?;
//! assert_eq!(file.file_name, "report.csv");
//! assert_eq!(file.mime_type, "text/csv");
//!
//! let mut text = String::new();
//! file.buffer.read_to_string(&mut text)?;
//! assert_eq!(text, "a,b\n1,\n");
//! # Ok(())
//! # }
//! ```

pub mod csv;
pub mod excel;

use std::io::{Cursor, Seek};
use std::path::Path;

use crate::error::{ExportError, ExportResult};
use crate::types::{TabularDocument, TabularFormat};

/// An encoded document ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Encoded bytes, positioned at the start.
    pub buffer: Cursor<Vec<u8>>,
    /// Suggested download name: the source file's stem with the target extension.
    pub file_name: String,
    /// MIME type of the encoded bytes.
    pub mime_type: &'static str,
    /// Encoding used.
    pub format: TabularFormat,
}

impl ExportedFile {
    /// The encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        self.buffer.get_ref()
    }

    /// Consume the file, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.into_inner()
    }
}

/// Encode `document` in `format`.
///
/// `source_name` is the name of the file the document came from; its stem names the export
/// (`report.XLSX` exported as CSV becomes `report.csv`).
///
/// Fails with [`ExportError::EmptyDocument`] when the document has no columns.
pub fn export(
    document: &TabularDocument,
    format: TabularFormat,
    source_name: &str,
) -> ExportResult<ExportedFile> {
    if document.column_count() == 0 {
        return Err(ExportError::EmptyDocument);
    }

    let mut buffer = Cursor::new(Vec::new());
    match format {
        TabularFormat::Csv => csv::write_csv(document, &mut buffer)?,
        TabularFormat::Spreadsheet => excel::write_xlsx(document, &mut buffer)?,
    }
    buffer.rewind()?;

    let file_name = converted_file_name(source_name, format);
    tracing::debug!(
        file = %file_name,
        bytes = buffer.get_ref().len(),
        rows = document.row_count(),
        "exported document"
    );

    Ok(ExportedFile {
        buffer,
        file_name,
        mime_type: format.mime_type(),
        format,
    })
}

/// Replace the extension of `source_name` with the one for `format`.
///
/// Only the final path component is kept, so the suggested name is always a bare file name.
pub fn converted_file_name(source_name: &str, format: TabularFormat) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("export");
    format!("{stem}.{}", format.extension())
}
