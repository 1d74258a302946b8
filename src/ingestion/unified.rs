//! Unified ingestion entrypoints.
//!
//! Most callers should use [`ingest_bytes`] (an upload held in memory) or [`ingest_from_path`],
//! which decode a file into an in-memory [`crate::types::TabularDocument`].
//!
//! - If [`IngestionOptions::format`] is `None`, the format is inferred from the file extension
//!   (case-insensitive: `.csv` or `.xlsx`).
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{TabularDocument, TabularFormat};

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, excel};

/// How to choose the sheet when ingesting a workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetSelection {
    /// Ingest the first sheet (default).
    #[default]
    First,
    /// Ingest a single named sheet.
    Named(String),
}

impl SheetSelection {
    fn as_name(&self) -> Option<&str> {
        match self {
            Self::First => None,
            Self::Named(name) => Some(name.as_str()),
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<TabularFormat>,
    /// Spreadsheet-specific sheet choice.
    pub sheet: SheetSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("sheet", &self.sheet)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet: SheetSelection::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Decode an uploaded file held in memory.
///
/// `file_name` is used for format inference and reporting only; nothing is read from disk.
/// An extension other than `.csv`/`.xlsx` fails with [`IngestionError::UnsupportedFormat`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```rust
/// use data_sweeper::ingestion::{ingest_bytes, IngestionOptions};
/// use data_sweeper::types::SemanticType;
///
/// # fn main() -> Result<(), data_sweeper::IngestionError> {
/// let doc = ingest_bytes("scores.CSV", b"name,score\nAda,98.5\n", &IngestionOptions::default())?;
/// assert_eq!(doc.row_count(), 1);
/// assert_eq!(doc.schema.fields[1].semantic_type, SemanticType::Numeric);
/// # Ok(())
/// # }
/// ```
pub fn ingest_bytes(
    file_name: &str,
    bytes: &[u8],
    options: &IngestionOptions,
) -> IngestionResult<TabularDocument> {
    let format = resolve_format(file_name, options);
    let known = format.as_ref().ok().copied();
    let result = format.and_then(|fmt| decode(fmt, bytes, &options.sheet));
    report(file_name, known, &result, options);
    result
}

/// Decode a file on disk, inferring the format from its extension.
///
/// ```no_run
/// use data_sweeper::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), data_sweeper::IngestionError> {
/// let doc = ingest_from_path("report.xlsx", &IngestionOptions::default())?;
/// println!("rows={}", doc.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(
    path: impl AsRef<Path>,
    options: &IngestionOptions,
) -> IngestionResult<TabularDocument> {
    let path = path.as_ref();
    let file_name = path.display().to_string();
    let format = resolve_format(&file_name, options);
    let known = format.as_ref().ok().copied();

    let result = format.and_then(|fmt| match fmt {
        TabularFormat::Csv => csv::ingest_csv_from_path(path),
        TabularFormat::Spreadsheet => excel::ingest_excel_from_path(path, options.sheet.as_name()),
    });
    report(&file_name, known, &result, options);
    result
}

fn decode(
    format: TabularFormat,
    bytes: &[u8],
    sheet: &SheetSelection,
) -> IngestionResult<TabularDocument> {
    match format {
        TabularFormat::Csv => csv::ingest_csv_from_bytes(bytes),
        TabularFormat::Spreadsheet => excel::ingest_excel_from_bytes(bytes, sheet.as_name()),
    }
}

fn resolve_format(file_name: &str, options: &IngestionOptions) -> IngestionResult<TabularFormat> {
    match options.format {
        Some(f) => Ok(f),
        None => infer_format(file_name),
    }
}

/// Infer the tabular format from a file name's extension (case-insensitive).
pub fn infer_format(file_name: &str) -> IngestionResult<TabularFormat> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    TabularFormat::from_extension(ext).ok_or_else(|| IngestionError::UnsupportedFormat {
        file_name: file_name.to_owned(),
        extension: if ext.is_empty() {
            String::new()
        } else {
            format!(".{}", ext.to_ascii_lowercase())
        },
    })
}

fn report(
    file_name: &str,
    format: Option<TabularFormat>,
    result: &IngestionResult<TabularDocument>,
    options: &IngestionOptions,
) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    let ctx = IngestionContext {
        file_name: file_name.to_owned(),
        format,
    };
    match result {
        Ok(doc) => obs.on_success(
            &ctx,
            IngestionStats {
                rows: doc.row_count(),
                columns: doc.column_count(),
            },
        ),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(&ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(&ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        IngestionError::Excel(calamine::Error::Io(_)) => IngestionSeverity::Critical,
        IngestionError::Excel(_) => IngestionSeverity::Error,
        IngestionError::UnsupportedFormat { .. } => IngestionSeverity::Warning,
        IngestionError::EmptyInput { .. } => IngestionSeverity::Error,
        IngestionError::RaggedRow { .. } => IngestionSeverity::Error,
    }
}
