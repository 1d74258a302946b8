use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for in-memory document transformations.
pub type ProcessingResult<T> = Result<T, ProcessingError>;

/// Convenience result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Convenience result type for a full per-file pipeline run.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by ingestion functions.
///
/// This is a single error enum shared across CSV and spreadsheet ingestion.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet decoding error.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The file extension is neither `.csv` nor `.xlsx`.
    #[error("unsupported file type '{extension}' for '{file_name}' (expected .csv or .xlsx)")]
    UnsupportedFormat { file_name: String, extension: String },

    /// The input has no header row to name columns from.
    #[error("empty input: {message}")]
    EmptyInput { message: String },

    /// A CSV record carries more fields than the header names.
    #[error("row {row} has {found} fields but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Error type returned by document transformations.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// A selected column does not exist in the document.
    #[error("column '{column}' not found. columns={available:?}")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// A named selection with no columns was passed to projection.
    #[error("column selection is empty; select at least one column")]
    EmptySelection,

    /// The same column was selected more than once.
    #[error("column '{column}' selected more than once")]
    DuplicateSelection { column: String },
}

/// Error type returned by export functions.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing or rewinding the in-memory buffer failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet encoding error.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The document has no columns, so there is nothing to encode.
    #[error("document has no columns to export")]
    EmptyDocument,

    /// The document does not fit in a single worksheet.
    #[error("document with {rows} rows and {columns} columns exceeds worksheet limits")]
    SheetLimit { rows: usize, columns: usize },
}

/// Any failure of a per-file pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
