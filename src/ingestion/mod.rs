//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_bytes`] or [`ingest_from_path`] (from [`unified`]) which:
//!
//! - infer the format from the file extension, case-insensitively (or you can force a format via
//!   [`IngestionOptions`])
//! - decode into an in-memory [`crate::types::TabularDocument`] with per-column semantic types
//! - optionally report success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`excel`]

pub mod csv;
pub mod excel;
mod infer;
pub mod observability;
pub mod unified;

pub use infer::{MISSING_TOKENS, is_missing_token, parse_datetime};
pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use unified::{IngestionOptions, SheetSelection, infer_format, ingest_bytes, ingest_from_path};
