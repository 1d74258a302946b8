//! `data-sweeper` loads CSV and XLSX files into an in-memory [`types::TabularDocument`], cleans
//! them, and converts them between the two formats.
//!
//! The pipeline for one file is linear and stateless:
//!
//! ingest → (deduplicate) → (fill missing numeric) → project columns → (chart summary) → export
//!
//! Each step is a plain function from a document (plus explicit parameters) to a new document or
//! buffer, so a UI shell can re-run the chain on every interaction. [`pipeline::FileSession`]
//! packages that chain for one uploaded file.
//!
//! ## What you can ingest
//!
//! **File formats (selected by extension, case-insensitive):**
//!
//! - **CSV**: `.csv`
//! - **Spreadsheet**: `.xlsx` (first sheet unless another is named)
//!
//! Any other extension fails with [`IngestionError::UnsupportedFormat`].
//!
//! **Semantic types:** each column is tagged once at ingest with a [`types::SemanticType`]:
//!
//! - [`types::SemanticType::Numeric`]: every present cell is a number (or the column is empty)
//! - [`types::SemanticType::Boolean`]: every present cell is `true`/`false`
//! - [`types::SemanticType::Date`]: every present cell is an ISO date/date-time or a spreadsheet date
//! - [`types::SemanticType::Text`]: anything else
//!
//! Empty cells and common missing markers (`NA`, `NaN`, `null`, ...) become [`types::Value::Null`].
//!
//! ## Quick example
//!
//! ```rust
//! use data_sweeper::export::export;
//! use data_sweeper::ingestion::{ingest_bytes, IngestionOptions};
//! use data_sweeper::processing::{clean, project_columns, CleaningOptions, ColumnSelection};
//! use data_sweeper::types::TabularFormat;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = ingest_bytes("data.csv", b"a,b\n1,2\n1,2\n3,\n", &IngestionOptions::default())?;
//! let cleaned = clean(&doc, &CleaningOptions { remove_duplicates: true, fill_missing_numeric: true });
//! let kept = project_columns(&cleaned, &ColumnSelection::All)?;
//!
//! let file = export(&kept, TabularFormat::Csv, "data.csv")?;
//! assert_eq!(file.bytes(), b"a,b\n1,2\n3,2\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: format dispatch, CSV/XLSX decoders, ingestion observers
//! - [`types`]: document, schema and value types
//! - [`processing`]: preview, deduplicate, fill, project, chart summary
//! - [`export`]: CSV/XLSX encoders into rewound in-memory buffers
//! - [`pipeline`]: per-file sessions and batch runs with failure isolation
//! - [`error`]: error types used across the crate
//! - [`logging`]: `tracing-subscriber` setup for the binary

pub mod error;
pub mod export;
pub mod ingestion;
pub mod logging;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{
    ExportError, ExportResult, IngestionError, IngestionResult, PipelineError, PipelineResult, ProcessingError,
    ProcessingResult,
};
